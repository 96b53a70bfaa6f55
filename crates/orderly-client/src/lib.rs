//! # Orderly Client
//!
//! Clients for reaching other Orderly services over the network. The order
//! service uses [`HttpUserDirectory`] when the user service runs in another
//! process.

mod http_user_directory;

pub use http_user_directory::*;
