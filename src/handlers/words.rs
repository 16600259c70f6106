use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::{json, ApiErr, ApiResp, Ctx, Result};
use crate::{
    index::InsertError,
    models::{Inserted, Stats, Suggestions},
};

/// Insert a word into the index.
pub async fn insert_word(
    State(ctx): State<Arc<Ctx>>,
    Path(word): Path<String>,
) -> Result<ApiResp<Inserted>> {
    // Inserts rewrite the word store on disk.
    let index = ctx.index.clone();
    let w = word.clone();
    let res = tokio::task::spawn_blocking(move || index.try_insert(&w)).await?;

    match res {
        Ok(idx) => {
            log::debug!("inserted '{}' at {}", word, idx);
            Ok(json(Inserted {
                status: "inserted".to_string(),
                word,
            }))
        }
        Err(e @ InsertError::Empty) => Err(ApiErr::new(e.to_string(), StatusCode::BAD_REQUEST)),
        Err(e @ InsertError::Duplicate) => Err(ApiErr::new(e.to_string(), StatusCode::CONFLICT)),
    }
}

/// Get words starting with the given prefix.
pub async fn autocomplete(
    State(ctx): State<Arc<Ctx>>,
    Path(prefix): Path<String>,
) -> Result<ApiResp<Suggestions>> {
    // The read lock waits out any insert that is writing the store to disk.
    let index = ctx.index.clone();
    let mut suggestions =
        tokio::task::spawn_blocking(move || index.autocomplete(&prefix)).await?;
    if ctx.consts.max_suggestions > 0 {
        suggestions.truncate(ctx.consts.max_suggestions);
    }

    Ok(json(Suggestions { suggestions }))
}

/// Get index stats.
pub async fn get_stats(State(ctx): State<Arc<Ctx>>) -> ApiResp<Stats> {
    json(Stats {
        words: ctx.index.len(),
        nodes: ctx.index.num_nodes(),
    })
}
