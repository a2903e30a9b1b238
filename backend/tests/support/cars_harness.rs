//! Server harness and shared world for the `/cars` behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::HttpServer;
use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::web;
use awc::Client;
use cars_backend::domain::ports::CarRepository;
use cars_backend::domain::{CarService, TRACE_ID_HEADER};
use cars_backend::inbound::http::health::HealthState;
use cars_backend::inbound::http::state::HttpState;
use cars_backend::outbound::persistence::InMemoryCarRepository;
use cars_backend::server::{AppDependencies, build_app};
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct ServerContext {
    pub(crate) base_url: String,
    pub(crate) handle: ServerHandle,
}

pub(crate) struct CarsWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) server: Option<ServerContext>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<CarsWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        if let Some(server) = ctx.server.as_ref() {
            let handle = server.handle.clone();
            ctx.local.block_on(&ctx.runtime, async move {
                handle.stop(true).await;
            });
        }
    }
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    WorldFixture {
        world: Rc::new(RefCell::new(CarsWorld {
            runtime,
            local: LocalSet::new(),
            server: None,
            last_status: None,
            last_body: None,
            last_trace_id: None,
        })),
    }
}

async fn spawn_server(repository: Arc<dyn CarRepository>) -> Result<ServerContext, String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(HttpState::from_service(CarService::new(repository)));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    health_state.mark_ready();

    Ok(ServerContext {
        base_url: format!("http://{addr}"),
        handle,
    })
}

pub(crate) fn start_server(world: &SharedWorld, repository: InMemoryCarRepository) {
    let server = {
        let ctx = world.borrow();
        ctx.local
            .block_on(&ctx.runtime, spawn_server(Arc::new(repository)))
            .expect("server starts")
    };
    world.borrow_mut().server = Some(server);
}

/// Send a request and record status, body and trace id on the world.
pub(crate) fn perform_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    payload: Option<String>,
) {
    let (status, trace_id, body) = {
        let ctx = world.borrow();
        let base_url = ctx
            .server
            .as_ref()
            .map(|server| server.base_url.clone())
            .expect("server running");
        let url = format!("{base_url}{path}");
        ctx.local.block_on(&ctx.runtime, async move {
            let request = Client::default().request(method, url);
            let mut response = match payload {
                Some(payload) => request
                    .insert_header(("content-type", "application/json"))
                    .send_body(payload)
                    .await
                    .expect("json request"),
                None => request.send().await.expect("request"),
            };
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response.body().await.expect("body");
            let json: Value = serde_json::from_slice(&body).expect("json body");
            (status, trace_id, json)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}
