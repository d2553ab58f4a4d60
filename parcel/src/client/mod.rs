//! Blocking HTTP client.
//!
//! [`HttpClient`] sends one configured [`Request`] through a [`Transport`]
//! and turns the response body into a [`Payload`](crate::Payload) by content
//! negotiation.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use parcel::{basic, HttpClient, HttpMethod, Payload, Form};
//!
//! let form = Form::from([("grant_type", "client_credentials")]);
//! let client = HttpClient::builder()
//!     .method(HttpMethod::Post)
//!     .endpoint("https://auth.example.com/token")
//!     .accept([basic::OAUTH_TOKEN.clone(), basic::OAUTH_ERROR.clone()])
//!     .body(Payload::from_element(&basic::FORM_URL_ENCODED, form)?)
//!     .build()?;
//!
//! let response = client.execute()?;
//! if let Some(seconds) = response
//!     .body()
//!     .element()
//!     .as_oauth_token()
//!     .and_then(|token| token.expires_in_seconds)
//! {
//!     println!("expires in {seconds}s");
//! }
//! # Ok::<(), parcel::ParcelError>(())
//! ```

mod executor;
mod request;
mod response;
mod transport;

pub use executor::{HttpClient, HttpClientBuilder};
pub use request::{HeaderMultimap, Request};
pub use response::Response;
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportConfig, TransportRequest};
