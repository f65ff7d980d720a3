use http::Method;
use log::info;
use serde_json::json;

use crate::error::Result;
use crate::ghorg::Context;
use crate::github::{endpoint, ApiRequest, Gateway, Transport};
use crate::projection::render_status;

/// Set the expiry date of an entry on the private API. The output is the
/// response status code; any status, success or not, is a result here.
pub async fn expire<T: Transport>(context: &Context, gateway: &Gateway<T>) -> Result<String> {
    let args = context.args()?;
    let (id, expires_at) = (&args[0], &args[1]);
    let credentials = context.config.expire()?;
    let url = endpoint(&credentials.api_url, &[id.as_str()]);

    let request = ApiRequest::expire(&credentials, Method::PATCH, url)
        .json(json!({ "expiresAt": expires_at }));
    let response = gateway.send(request).await?;
    info!("Expire {id} at {expires_at}: {}", response.status);

    Ok(render_status(&response))
}
