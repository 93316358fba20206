use actix_web::{HttpResponse, web};
use serde::Serialize;

use exome::lookup::{self, SAMPLE_SIZE};
use exome::Gene;
use crate::app::{with_store, ApiError, AppData};

#[derive(Debug, Serialize)]
struct SampleResponse {
    genes: Vec<Gene>,
}

pub async fn list(data: web::Data<AppData>) -> Result<HttpResponse, ApiError> {
    let genes = with_store(data, |store| lookup::sample_genes(store, SAMPLE_SIZE)).await??;
    Ok(HttpResponse::Ok().json(SampleResponse { genes }))
}

pub async fn read(
    data: web::Data<AppData>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let symbol = path.into_inner();
    let detail = with_store(data, move |store| lookup::gene_detail(store, &symbol)).await??;
    Ok(HttpResponse::Ok().json(detail))
}
