//! Response resolution.
//!
//! [`resolve`] folds a [`RawResponse`] and a [`Decoder`] into a single
//! result. The decoder only runs on a good status; a failing status wins over
//! whatever the body contains.

use crate::{DetailedError, Decoder, Metadata, RawResponse};

/// Classify a raw response and decode its body.
///
/// | Response | Result |
/// |----------|--------|
/// | `BadUrl(url)` | `Err(BadUrl(url))` |
/// | `Timeout` | `Err(Timeout)` |
/// | `NetworkError` | `Err(NetworkError)` |
/// | `BadStatus` | `Err(BadStatus)`, decoder not called |
/// | `GoodStatus` | `Ok((metadata, value))` or `Err(BadBody)` |
///
/// # Example
///
/// ```
/// use sift_core::{Json, Metadata, RawResponse, resolve};
///
/// let raw: RawResponse<String> =
///     RawResponse::from_status(Metadata::new("https://x", 200), r#"[1,2]"#);
/// let (metadata, value) = resolve(&Json::<Vec<u8>>::new(), raw).unwrap();
///
/// assert_eq!(metadata.status_code(), 200);
/// assert_eq!(value, vec![1, 2]);
/// ```
pub fn resolve<B, D>(
    decoder: &D,
    response: RawResponse<B>,
) -> Result<(Metadata, D::Output), DetailedError<B>>
where
    D: Decoder<B> + ?Sized,
{
    match response {
        RawResponse::BadUrl(url) => Err(DetailedError::BadUrl(url)),
        RawResponse::Timeout => Err(DetailedError::Timeout),
        RawResponse::NetworkError => Err(DetailedError::NetworkError),
        RawResponse::BadStatus { metadata, body } => {
            Err(DetailedError::BadStatus { metadata, body })
        }
        RawResponse::GoodStatus { metadata, body } => match decoder.decode(&metadata, &body) {
            Ok(value) => Ok((metadata, value)),
            Err(reason) => Err(DetailedError::BadBody {
                metadata,
                body,
                reason,
            }),
        },
    }
}
