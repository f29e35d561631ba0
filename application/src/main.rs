use std::{io, sync::OnceLock, time};

use application::{config, Args, Config};
use axum::{extract::MatchedPath, Router};
use axum_client_ip::InsecureClientIp;
use service::{infra::Memory, Service};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::MakeWriter,
    layer::{Layer, SubscriberExt as _},
    registry::LookupSpan,
    util::SubscriberInitExt as _,
};

/// Levels written to stderr, the rest goes to stdout.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Maximum [`log::Level`] to write, set once the [`Config`] is loaded.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(output(io::stdout, false))
        .with(output(io::stderr, true))
        .init();

    _ = start().await;
}

/// Compact log output into the provided `writer`, accepting either the
/// [`STDERR_LEVELS`] or all the other ones.
fn output<S, W>(writer: W, stderr: bool) -> impl Layer<S>
where
    S: log::Subscriber + for<'s> LookupSpan<'s>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(true)
        .with_thread_names(true)
        .with_writer(writer)
        .with_filter(filter_fn(move |meta| {
            let max = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
            meta.is_span()
                || STDERR_LEVELS.contains(meta.level()) == stderr
                    && max >= *meta.level()
        }))
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        service,
        server,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let config::Seed { users } = service.seed;
    let memory = Memory::mock(users);
    log::info!("seeded {users} mock users");

    let app = traced(
        application::router(Service::new(service.into(), memory))
            .layer(cors(&server.cors)?),
    );

    let listener = TcpListener::bind((server.host.as_str(), server.port))
        .await
        .map_err(|e| {
            log::error!(
                "failed to listen on `{}:{}`: {e}",
                server.host,
                server.port,
            );
        })?;
    log::info!("listening on `{}:{}`", server.host, server.port);

    axum::serve(listener, app)
        .await
        .map_err(|e| log::error!("webserver failed: {e}"))
}

/// Builds the [`CorsLayer`] out of the provided [`config::Cors`].
fn cors(config: &config::Cors) -> Result<CorsLayer, ()> {
    config.origins.iter().try_fold(
        CorsLayer::new()
            .allow_methods([
                http::Method::DELETE,
                http::Method::GET,
                http::Method::OPTIONS,
                http::Method::POST,
                http::Method::PUT,
            ])
            .allow_headers([http::header::CONTENT_TYPE]),
        |cors, origin| {
            let origin = origin.parse::<http::HeaderValue>().map_err(|e| {
                log::error!("`{origin}` is not a valid CORS origin: {e}");
            })?;
            Ok(cors.allow_origin(origin))
        },
    )
}

/// Wraps the provided [`Router`] into a span per HTTP request, logging the
/// response status with its duration.
fn traced(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|r: &http::Request<_>| {
                log::info_span!(
                    "HTTP request",
                    http.client_ip = InsecureClientIp::from(
                        r.headers(),
                        r.extensions()
                    )
                        .map(|ip| ip.0.to_string())
                        .ok(),
                    http.method = r.method().as_str(),
                    http.route = r
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str),
                    http.target = r
                        .uri()
                        .path_and_query()
                        .map(http::uri::PathAndQuery::as_str),
                    http.user_agent = r
                        .headers()
                        .get(http::header::USER_AGENT)
                        .and_then(|h| h.to_str().ok()),
                    http.status_code = log::field::Empty,
                )
            })
            .on_response(
                |r: &http::Response<_>,
                 dur: time::Duration,
                 span: &log::Span| {
                    let status = r.status();
                    _ = span.record("http.status_code", status.as_u16());

                    let duration = format!("{}ms", dur.as_millis());
                    if status.is_server_error() {
                        log::error!(duration = %duration);
                    } else if status.is_client_error() {
                        log::warn!(duration = %duration);
                    } else {
                        log::info!(duration = %duration);
                    }
                },
            ),
    )
}
