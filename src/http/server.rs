use crate::{
    modules::{
        download::{Payload, Video},
        Downloader, Resolver,
    },
    responses::Failure,
    util::{chain, inspect_err, Error},
};
use headers::HeaderMapExt as _;
use serde::{de::DeserializeOwned, Deserialize};
use std::{convert::Infallible, sync::Arc};
use warp::{
    http::{
        header::{
            HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, Method, StatusCode,
    },
    hyper::body::Bytes,
    reply::Response,
    Filter, Reply,
};

/// Both routes, with the CORS headers on every response
pub fn routes(
    resolver: Arc<Resolver>,
    downloader: Arc<Downloader>,
) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    fn with<T: Send + Sync>(
        item: Arc<T>,
    ) -> impl Filter<Extract = (Arc<T>,), Error = Infallible> + Clone {
        warp::any().map(move || item.clone())
    }

    let parse = warp::path!("parse")
        .and(warp::method())
        .and(warp::body::bytes())
        .and(with(resolver))
        .and_then(parse);

    let download = warp::path!("download")
        .and(warp::method())
        .and(warp::body::bytes())
        .and(with(downloader))
        .and_then(download);

    parse
        .or(download)
        .unify()
        .with(warp::reply::with::headers(cors_headers()))
        .with(warp::log("vidgrab::http"))
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers
}

#[derive(Default, Deserialize)]
struct ParseRequest {
    url: Option<String>,
    platform: Option<String>,
}

#[derive(Default, Deserialize)]
struct DownloadRequest {
    url: Option<String>,
}

async fn parse(
    method: Method,
    body: Bytes,
    resolver: Arc<Resolver>,
) -> Result<Response, Infallible> {
    if let Some(resp) = preflight(&method) {
        return Ok(resp);
    }

    let resolve = async {
        let req: ParseRequest = request_body(&body)?;
        let url = required(req.url)?;
        resolver.resolve(&url, req.platform.as_deref()).await
    };

    Ok(match resolve.await {
        Ok(meta) => warp::reply::json(&meta).into_response(),
        Err(err) => failure("Parse failed", err),
    })
}

async fn download(
    method: Method,
    body: Bytes,
    downloader: Arc<Downloader>,
) -> Result<Response, Infallible> {
    if let Some(resp) = preflight(&method) {
        return Ok(resp);
    }

    let fetch = async {
        let req: DownloadRequest = request_body(&body)?;
        let url = required(req.url)?;
        downloader.fetch(&url).await
    };

    Ok(match fetch.await {
        Ok(video) => video_response(video),
        Err(err) => failure("Download failed", err),
    })
}

fn video_response(video: Video) -> Response {
    let Video {
        content_type,
        content_length,
        payload,
    } = video;

    let body = match payload {
        Payload::Buffered(body) => warp::hyper::Body::from(body),
        Payload::Streaming(resp) => warp::hyper::Body::wrap_stream(resp.bytes_stream()),
    };

    let mut resp = Response::new(body);
    let headers = resp.headers_mut();
    headers.typed_insert(headers::ContentType::from(content_type));
    if let Some(len) = content_length {
        headers.typed_insert(headers::ContentLength(len));
    }
    resp
}

/// OPTIONS is answered right away, anything but POST is refused
fn preflight(method: &Method) -> Option<Response> {
    if *method == Method::OPTIONS {
        return Some(StatusCode::OK.into_response());
    }
    if *method != Method::POST {
        return Some(rejected(&Error::MethodNotAllowed));
    }
    None
}

/// An empty body is the same as an empty object
fn request_body<T>(body: &[u8]) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| anyhow::anyhow!("invalid request body: {}", err))
}

fn required(url: Option<String>) -> anyhow::Result<String> {
    url.filter(|s| !s.is_empty())
        .ok_or_else(|| Error::UrlRequired.into())
}

fn rejected(err: &Error) -> Response {
    let body = Failure {
        error: err.to_string(),
        message: None,
    };
    warp::reply::with_status(warp::reply::json(&body), err.status()).into_response()
}

fn failure(label: &str, err: anyhow::Error) -> Response {
    if let Some(err) = err
        .downcast_ref::<Error>()
        .filter(|err| err.status().is_client_error())
    {
        return rejected(err);
    }

    inspect_err(&err, || label);
    let body = Failure {
        error: label.to_string(),
        message: Some(chain(&err)),
    };
    warp::reply::with_status(warp::reply::json(&body), StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}
