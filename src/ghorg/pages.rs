use http::Method;

use crate::error::Result;
use crate::ghorg::Context;
use crate::github::{endpoint, ApiRequest, Gateway, Transport};
use crate::projection::{check_status, project, ProjectionSpec};

/// Show where a repository's GitHub Pages site is published
pub async fn pages<T: Transport>(context: &Context, gateway: &Gateway<T>) -> Result<String> {
    let args = context.args()?;
    let credentials = context.config.github()?;
    let url = endpoint(
        &credentials.api_url,
        &["repos", credentials.org.as_str(), args[0].as_str(), "pages"],
    );

    let response = gateway
        .send(ApiRequest::github(&credentials, Method::GET, url))
        .await?;
    check_status(&response)?;
    project(&response, ProjectionSpec::Pages, context.verbose())
}
