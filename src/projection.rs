//! Narrows a decoded API response down to what the operator asked to see.

use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::github::ApiResponse;
use crate::utils::snippet;

/// Which part of a response a command shows when not in verbose mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionSpec {
    /// The whole payload
    Full,
    /// One `login html_url` line per array element
    Members,
    /// Only `url`, `state` and `role`
    Membership,
    /// Only `html_url`
    Pages,
    /// `name` (as `repo`) and `html_url`
    Repo,
}

const MEMBERSHIP_FIELDS: [&str; 3] = ["url", "state", "role"];

/// Decode the body as JSON and render it per `spec`, or in full when `verbose`
pub fn project(response: &ApiResponse, spec: ProjectionSpec, verbose: bool) -> Result<String> {
    let value = decode(response)?;

    if verbose {
        return pretty(response, &value);
    }

    match spec {
        ProjectionSpec::Full => pretty(response, &value),
        ProjectionSpec::Members => members(response, &value),
        ProjectionSpec::Membership => Ok(membership(&value).to_string()),
        ProjectionSpec::Pages => Ok(json!({ "html_url": field(&value, "html_url") }).to_string()),
        ProjectionSpec::Repo => Ok(json!({
            "repo": field(&value, "name"),
            "html_url": field(&value, "html_url"),
        })
        .to_string()),
    }
}

/// Parse a response body as JSON, keeping the status and a bit of the body on failure
pub fn decode(response: &ApiResponse) -> Result<Value> {
    serde_json::from_slice(&response.body).map_err(|e| Error::Projection {
        status: response.status,
        reason: e.to_string(),
        snippet: snippet(&response.body_text()),
    })
}

/// Fail with an API error unless the response status is 2xx
pub fn check_status(response: &ApiResponse) -> Result<()> {
    if response.status.is_success() {
        Ok(())
    } else {
        Err(Error::Api {
            status: response.status,
            snippet: snippet(&response.body_text()),
        })
    }
}

/// The response as curl -i would show it: status line, headers, blank line, body
pub fn render_raw(response: &ApiResponse) -> String {
    let mut out = format!("HTTP {}\n", response.status);
    for (name, value) in response.headers.iter() {
        out.push_str(&format!(
            "{}: {}\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    out.push('\n');
    out.push_str(&response.body_text());
    out
}

pub fn render_status(response: &ApiResponse) -> String {
    response.status.as_u16().to_string()
}

fn pretty(response: &ApiResponse, value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Projection {
        status: response.status,
        reason: e.to_string(),
        snippet: snippet(&response.body_text()),
    })
}

fn members(response: &ApiResponse, value: &Value) -> Result<String> {
    let items = value.as_array().ok_or_else(|| Error::Projection {
        status: response.status,
        reason: "expected a JSON array of members".to_string(),
        snippet: snippet(&response.body_text()),
    })?;

    let lines: Vec<String> = items
        .iter()
        .map(|item| format!("{} {}", text(item, "login"), text(item, "html_url")))
        .collect();
    Ok(lines.join("\n"))
}

fn membership(value: &Value) -> Value {
    let projected: Map<String, Value> = MEMBERSHIP_FIELDS
        .iter()
        .filter_map(|&name| value.get(name).map(|v| (name.to_string(), v.clone())))
        .collect();
    Value::Object(projected)
}

fn field(value: &Value, name: &str) -> Value {
    value.get(name).cloned().unwrap_or(Value::Null)
}

fn text(value: &Value, name: &str) -> String {
    match value.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue, StatusCode};

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_members_one_line_per_member_in_order() {
        let r = response(
            200,
            r#"[{"login":"a","html_url":"http://x/a"},{"login":"b","html_url":"http://x/b"}]"#,
        );
        let out = project(&r, ProjectionSpec::Members, false).unwrap();
        assert_eq!(out, "a http://x/a\nb http://x/b");
    }

    #[test]
    fn test_members_empty_array_is_empty_output() {
        let out = project(&response(200, "[]"), ProjectionSpec::Members, false).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_members_requires_an_array() {
        let result = project(&response(200, r#"{"login":"a"}"#), ProjectionSpec::Members, false);
        assert!(matches!(result, Err(Error::Projection { .. })));
    }

    #[test]
    fn test_membership_keeps_only_known_fields() {
        let r = response(
            200,
            r#"{"url":"u","state":"active","role":"member","extra":"ignored"}"#,
        );
        let out = project(&r, ProjectionSpec::Membership, false).unwrap();
        assert_eq!(out, r#"{"url":"u","state":"active","role":"member"}"#);
    }

    #[test]
    fn test_membership_omits_missing_fields() {
        let r = response(200, r#"{"role":"admin","state":"pending"}"#);
        let out = project(&r, ProjectionSpec::Membership, false).unwrap();
        assert_eq!(out, r#"{"state":"pending","role":"admin"}"#);
    }

    #[test]
    fn test_pages_null_when_missing() {
        let out = project(&response(200, r#"{"status":"built"}"#), ProjectionSpec::Pages, false).unwrap();
        assert_eq!(out, r#"{"html_url":null}"#);

        let r = response(200, r#"{"html_url":"https://course-org.github.io/site/"}"#);
        let out = project(&r, ProjectionSpec::Pages, false).unwrap();
        assert_eq!(out, r#"{"html_url":"https://course-org.github.io/site/"}"#);
    }

    #[test]
    fn test_repo_renames_name_to_repo() {
        let r = response(
            200,
            r#"{"id":1,"name":"site","html_url":"https://github.com/course-org/site","private":true}"#,
        );
        let out = project(&r, ProjectionSpec::Repo, false).unwrap();
        assert_eq!(
            out,
            r#"{"repo":"site","html_url":"https://github.com/course-org/site"}"#
        );
    }

    #[test]
    fn test_verbose_passes_everything_through() {
        let r = response(200, r#"{"url":"u","state":"active","role":"member","extra":"kept"}"#);
        let out = project(&r, ProjectionSpec::Membership, true).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["extra"], "kept");
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_invalid_json_keeps_status_and_snippet() {
        let r = response(502, "<html>Bad Gateway</html>");
        match project(&r, ProjectionSpec::Repo, false) {
            Err(Error::Projection { status, snippet, .. }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(snippet.contains("Bad Gateway"));
            }
            other => panic!("expected projection error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(&response(201, "{}")).is_ok());
        match check_status(&response(404, r#"{"message":"Not Found"}"#)) {
            Err(Error::Api { status, snippet }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(snippet.contains("Not Found"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_raw_includes_status_and_headers() {
        let mut r = response(200, r#"{"login":"octocat"}"#);
        r.headers
            .insert("x-ratelimit-remaining", HeaderValue::from_static("4999"));
        let out = render_raw(&r);
        assert!(out.starts_with("HTTP 200 OK\n"));
        assert!(out.contains("x-ratelimit-remaining: 4999\n"));
        assert!(out.ends_with("\n\n{\"login\":\"octocat\"}"));
    }

    #[test]
    fn test_render_status() {
        assert_eq!(render_status(&response(204, "")), "204");
        assert_eq!(render_status(&response(404, "")), "404");
    }
}
