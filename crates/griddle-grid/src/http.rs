use http::{Method, Request, Response, StatusCode};

use griddle_query::{ParamSource, parse_params};

use crate::error::GridError;
use crate::response::ApiResponse;
use crate::service::GridService;
use crate::source::GridSource;

/// Framework-agnostic HTTP surface for one grid endpoint.
///
/// `GET /data` runs the pipeline over the request's query parameters;
/// `GET /config` returns the column exposure so frontends can build
/// themselves from it.
pub struct GridHttp<S: GridSource> {
    service: GridService,
    source: S,
}

impl<S: GridSource> GridHttp<S> {
    pub fn new(service: GridService, source: S) -> Self {
        GridHttp { service, source }
    }

    pub fn handle(&self, req: Request<Vec<u8>>) -> Response<Vec<u8>> {
        let path = req.uri().path();
        let method = req.method();

        match (method, path.trim_end_matches('/')) {
            (&Method::GET, "/config") => self.get_config(),
            (&Method::GET, "/data") => self.get_data(&req),
            _ => json_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#),
        }
    }

    fn get_config(&self) -> Response<Vec<u8>> {
        match serde_json::to_vec(self.service.config()) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(e) => envelope_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        }
    }

    fn get_data(&self, req: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let query = QueryParams::parse(req.uri().query().unwrap_or(""));
        let params = parse_params(&query);

        let result = self
            .source
            .query()
            .map_err(GridError::from)
            .and_then(|base| self.service.data(&base, &params));

        match result {
            Ok(data) => match serde_json::to_vec(&ApiResponse::ok(data)) {
                Ok(body) => json_response(StatusCode::OK, body),
                Err(e) => envelope_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
            },
            Err(e) => envelope_error(e.status_code(), &e.to_string()),
        }
    }
}

/// Percent-decoded query parameters. Lookups return the first occurrence of
/// a repeated key.
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(raw: &str) -> Self {
        QueryParams {
            pairs: form_urlencoded::parse(raw.as_bytes()).into_owned().collect(),
        }
    }
}

impl ParamSource for QueryParams {
    fn param(&self, name: &str) -> Option<String> {
        self.pairs.as_slice().param(name)
    }
}

fn json_response(status: StatusCode, body: impl Into<Vec<u8>>) -> Response<Vec<u8>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn envelope_error(status: StatusCode, message: &str) -> Response<Vec<u8>> {
    let body = serde_json::json!(ApiResponse::error(message));
    json_response(status, body.to_string().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_decode_bracketed_names() {
        let query = QueryParams::parse("search%5Bvalue%5D=foo+bar&order[0][dir]=desc");
        assert_eq!(query.param("search[value]").as_deref(), Some("foo bar"));
        assert_eq!(query.param("order[0][dir]").as_deref(), Some("desc"));
        assert_eq!(query.param("missing"), None);
    }

    #[test]
    fn query_params_first_occurrence_wins() {
        let query = QueryParams::parse("draw=3&draw=9");
        assert_eq!(query.param("draw").as_deref(), Some("3"));
    }
}
