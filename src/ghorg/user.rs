use http::Method;

use crate::error::Result;
use crate::ghorg::Context;
use crate::github::{endpoint, ApiRequest, Gateway, Transport};
use crate::projection::render_raw;

/// Show the authenticated user. The raw response is printed, status line and
/// headers included, whatever the status, so token scopes and rate limits are
/// visible too.
pub async fn user<T: Transport>(context: &Context, gateway: &Gateway<T>) -> Result<String> {
    context.args()?;
    let credentials = context.config.github()?;
    let url = endpoint(&credentials.api_url, &["user"]);

    let response = gateway
        .send(ApiRequest::github(&credentials, Method::GET, url))
        .await?;
    Ok(render_raw(&response))
}
