//! The browsing pages: homepage, search redirect and gene detail.
//!
//! Lookup misses and empty searches are not HTTP errors here; they send the
//! browser back to the homepage with the message shown inline.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use exome::lookup::{self, SAMPLE_SIZE};
use exome::ExomeError;

use crate::app::{pages, with_store, ApiError, AppData};

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    query_gene: String,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub async fn index(
    data: web::Data<AppData>,
    query: web::Query<HomeQuery>,
) -> Result<HttpResponse, ApiError> {
    let genes = with_store(data, |store| lookup::sample_genes(store, SAMPLE_SIZE)).await??;
    Ok(html(pages::home(&genes, query.error.as_deref())))
}

pub async fn search(form: web::Form<SearchForm>) -> HttpResponse {
    match lookup::handle_search_input(&form.query_gene) {
        Ok(target) => see_other(&target),
        Err(e) => see_other(&lookup::home_path_with_message(&e.to_string())),
    }
}

pub async fn gene(
    data: web::Data<AppData>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let symbol = path.into_inner();
    let result = with_store(data, move |store| lookup::gene_detail(store, &symbol)).await?;

    match result {
        Ok(detail) => {
            let variants_json = serde_json::to_string(&detail.variants)?;
            Ok(html(pages::gene(&detail.gene, &variants_json)))
        }
        Err(e @ ExomeError::NotFound { .. }) => {
            Ok(see_other(&lookup::home_path_with_message(&e.to_string())))
        }
        Err(e) => Err(e.into()),
    }
}
