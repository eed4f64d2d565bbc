//! Ethos API resources
//!
//! Resource wrappers and the [`Ethos`] client facade built on top of
//! `ethos-core`.
//!
//! # Resources
//!
//! - [`Profiles`]: lookup by id, address, Twitter handle or userkey
//! - [`Vouches`]: stakes between profiles
//! - [`Reviews`]: reviews between profiles
//! - [`Markets`]: reputation markets
//! - [`Activities`]: on-chain activity feed
//! - [`Scores`]: credibility scores
//!
//! # Example
//!
//! ```rust,no_run
//! use ethos_api::Ethos;
//! use futures::TryStreamExt;
//!
//! # async fn example() -> ethos_core::Result<()> {
//! let ethos = Ethos::default_client()?;
//!
//! let mut reviews = ethos.reviews().list(Default::default());
//! while let Some(review) = reviews.try_next().await? {
//!     println!("{} -> {}: {}", review.author_profile_id, review.subject_profile_id, review.score);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::wrong_self_convention)]

pub mod client;
pub mod resources;

pub use client::Ethos;
pub use resources::{
    Activities, ActivityListParams, MarketListParams, Markets, ProfileListParams,
    ProfileSearchParams, Profiles, ReviewListParams, Reviews, Scores, VouchListParams, Vouches,
};
