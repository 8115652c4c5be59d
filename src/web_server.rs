use crate::controller::GalleryController;
use crate::error::AppError;
use crate::view::UiPlan;
use actix_files::NamedFile;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use tokio::sync::Mutex;

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
}

async fn index() -> Result<NamedFile, AppError> {
    NamedFile::open_async("./static/index.html").await.map_err(|e| {
        log::error!("Error serving index.html: {}", e);
        AppError::Io(e)
    })
}

async fn submit_search(
    controller: web::Data<Mutex<GalleryController>>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, AppError> {
    log::debug!("Received search request for query: {:?}", request.query);

    let mut plan = UiPlan::default();
    let outcome = controller
        .lock()
        .await
        .submit_search(&request.query, &mut plan)
        .await;
    log::debug!("Search request finished: {:?}", outcome);

    Ok(HttpResponse::Ok().json(plan))
}

async fn load_more(
    controller: web::Data<Mutex<GalleryController>>,
) -> Result<HttpResponse, AppError> {
    log::debug!("Received load-more request");

    let mut plan = UiPlan::default();
    let outcome = controller.lock().await.load_more(&mut plan).await;
    log::debug!("Load-more request finished: {:?}", outcome);

    Ok(HttpResponse::Ok().json(plan))
}

pub async fn start_web_server(controller: GalleryController, port: u16) -> std::io::Result<()> {
    let controller_data = web::Data::new(Mutex::new(controller));

    log::info!("Starting web server on port: {}", port);
    log::debug!("Serving static files from ./static directory.");

    HttpServer::new(move || {
        App::new()
            .app_data(controller_data.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .service(web::resource("/api/search").route(web::post().to(submit_search)))
            .service(web::resource("/api/load-more").route(web::post().to(load_more)))
            .default_service(web::to(index)) // Serve index.html for any unmatched route
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
