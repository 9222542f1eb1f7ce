use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::signal::unix::{SignalKind, signal};

use griddle_grid::{GridConfig, GridHttp, GridOptions, GridService};
use griddle_source_memory::{MemorySource, demo_records};

fn load_config() -> GridConfig {
    let path =
        std::env::var("GRIDDLE_CONFIG").unwrap_or_else(|_| "/etc/griddle/grid.json".to_string());

    let content = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("failed to read config from {path}: {e}");
        std::process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("failed to parse config from {path}: {e}");
        std::process::exit(1);
    })
}

fn load_source() -> MemorySource {
    let Ok(path) = std::env::var("GRIDDLE_DATA") else {
        tracing::info!("GRIDDLE_DATA not set, serving 100 demo records");
        return MemorySource::new(demo_records(100));
    };

    let content = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("failed to read data from {path}: {e}");
        std::process::exit(1);
    });

    let value: serde_json::Value = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("failed to parse data from {path}: {e}");
        std::process::exit(1);
    });

    MemorySource::from_value(&value).unwrap_or_else(|| {
        eprintln!("data file {path} is not a JSON array of objects");
        std::process::exit(1);
    })
}

fn build_options() -> GridOptions {
    match std::env::var("GRIDDLE_DEFAULT_ORDER") {
        Ok(clause) if !clause.is_empty() => GridOptions::new().with_default_order(clause),
        _ => GridOptions::new(),
    }
}

async fn handle(
    req: Request<Incoming>,
    handler: Arc<GridHttp<MemorySource>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let (parts, body) = req.into_parts();
    let body_bytes = body.collect().await?.to_bytes().to_vec();
    let http_req = Request::from_parts(parts, body_bytes);
    let http_resp = handler.handle(http_req);
    let (parts, body_bytes) = http_resp.into_parts();
    Ok(Response::from_parts(
        parts,
        Full::new(Bytes::from(body_bytes)),
    ))
}

async fn shutdown_signal() {
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");
    sigterm.recv().await;
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = load_config();
    let source = load_source();
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    let service = GridService::new(config).with_options(build_options());
    let handler = Arc::new(GridHttp::new(service, source));

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to bind {bind_addr}: {e}");
            std::process::exit(1);
        });

    tracing::info!("griddle-server listening on {bind_addr}");

    let http = http1::Builder::new();
    let graceful = GracefulShutdown::new();
    let mut signal = pin!(shutdown_signal());

    loop {
        tokio::select! {
            Ok((stream, _)) = listener.accept() => {
                let io = TokioIo::new(stream);
                let handler = Arc::clone(&handler);
                let conn = http.serve_connection(io, service_fn(move |req| {
                    let handler = Arc::clone(&handler);
                    handle(req, handler)
                }));
                let fut = graceful.watch(conn);
                tokio::spawn(async move {
                    if let Err(e) = fut.await {
                        tracing::error!("connection error: {e}");
                    }
                });
            }
            _ = &mut signal => {
                tracing::info!("shutdown signal received");
                drop(listener);
                break;
            }
        }
    }

    tokio::select! {
        _ = graceful.shutdown() => {
            tracing::info!("shutdown complete");
        }
        _ = tokio::time::sleep(Duration::from_secs(10)) => {
            tracing::warn!("shutdown timed out after 10s");
        }
    }
}
