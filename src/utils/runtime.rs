use anyhow::Result;

/// Tab listing only needs a runtime to put a deadline on the interpreter, so one thread is enough.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
