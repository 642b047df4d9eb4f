use crate::config::DatasetSource;
use biodiversity_core::{DashboardError, RawDataset};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Read the dataset once, from disk or over HTTP.
pub async fn load_dataset(source: &DatasetSource) -> Result<RawDataset, DashboardError> {
    debug!(source = %source.describe(), "loading dataset");

    let bytes = match source {
        DatasetSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
            DashboardError::FetchFailure(format!("failed to read {}: {e}", path.display()))
        })?,
        DatasetSource::Url(url) => fetch_url(url).await?,
    };

    let dataset = RawDataset::from_json_slice(&bytes)?;
    info!(
        subjects = dataset.names.len(),
        source = %source.describe(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Start loading in the background; the draw loop polls the handle.
pub fn spawn_load(source: DatasetSource) -> JoinHandle<Result<RawDataset, DashboardError>> {
    tokio::spawn(async move { load_dataset(&source).await })
}

async fn fetch_url(url: &str) -> Result<Vec<u8>, DashboardError> {
    let fetch_error = |e: reqwest::Error| DashboardError::FetchFailure(format!("GET {url}: {e}"));

    let response = reqwest::get(url)
        .await
        .map_err(fetch_error)?
        .error_for_status()
        .map_err(fetch_error)?;
    let body = response.bytes().await.map_err(fetch_error)?;

    Ok(body.to_vec())
}
