//! Blocking URL loading

use crate::codec::decode;
use crate::surface::RasterImage;
use log::debug;
use raster_core::{RasterError, Result};
use std::time::Duration;

/// Request settings for [`fetch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// `User-Agent` header override
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: None,
        }
    }
}

fn network_error(err: reqwest::Error) -> RasterError {
    RasterError::NetworkFailure(err.to_string())
}

/// Download the body at `url`
///
/// Non-success status codes are failures. No retries are attempted.
pub fn fetch(url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    let mut builder = reqwest::blocking::Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(agent) = &options.user_agent {
        builder = builder.user_agent(agent.as_str());
    }
    let client = builder.build().map_err(network_error)?;

    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(network_error)?;
    let body = response.bytes().map_err(network_error)?;

    debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body.to_vec())
}

/// Download and decode the image at `url`
pub fn load_url(url: &str, options: &FetchOptions) -> Result<RasterImage> {
    decode(&fetch(url, options)?)
}
