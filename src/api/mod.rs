//! Remote access to the NASA POWER climatology API
//!
//! The HTTP transport sits behind the [`HttpClient`] trait so the loader can be
//! exercised with canned responses. [`FeedItemsMapper`] turns a raw response
//! into an [`IrradianceFeed`](crate::feed::IrradianceFeed) and
//! [`RemoteFeedLoader`] ties the two together.

pub mod endpoint;
pub mod http;
pub mod mapper;
pub mod remote;

pub use endpoint::climatology_url;
pub use http::{HttpClient, HttpError, HttpResponse, ReqwestHttpClient};
pub use mapper::{FeedItemsMapper, MapperError};
pub use remote::{RemoteFeedLoader, RemoteLoaderError};
