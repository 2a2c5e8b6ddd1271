use anyhow::Result;
use std::any::Any;

/// Best-effort text of a thread panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "thread panicked".to_string()
    }
}

/// Check merge result: if strict and any worker result was missing, fail the run; otherwise log how much was excluded.
/// Call after merging.
pub fn check_for_failed_workers(strict: bool, failed_workers: &[(usize, String)]) -> Result<()> {
    if failed_workers.is_empty() {
        return Ok(());
    }
    if strict {
        let ids: Vec<String> = failed_workers.iter().map(|(id, _)| id.to_string()).collect();
        anyhow::bail!(
            "strict mode: {} parser worker(s) produced no result (ids: {}); first error: {}",
            failed_workers.len(),
            ids.join(", "),
            failed_workers[0].1
        );
    }
    log::warn!(
        "Merged result excludes {} parser worker(s); counts may be low",
        failed_workers.len()
    );
    Ok(())
}
