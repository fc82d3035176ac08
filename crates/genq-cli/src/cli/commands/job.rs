//! `genq job <kind> <id>` – one status fetch for an existing job.

use anyhow::Result;
use genq_core::api::{ApiClient, MiniAppApi};
use genq_core::job::{JobId, JobStatus};
use genq_core::media::{MediaKind, MediaOutput};

pub async fn run_job(api: &ApiClient, kind: MediaKind, id: &str) -> Result<()> {
    let job = api.fetch_job(kind, &JobId::from(id)).await?;
    println!("job {}: {}", job.id, job.status);
    match job.status {
        JobStatus::Done => println!("{}", MediaOutput::from_result(kind, job.result.as_ref())?),
        JobStatus::Error => println!(
            "Error: {}",
            job.error.as_deref().unwrap_or("unknown error")
        ),
        _ => {}
    }
    Ok(())
}
