use rekrut::api::ApiError;
use rekrut::card::CardError;
use rekrut::cli::{internal_error, run};

/// Portal failures, bad payloads, and local I/O are internal errors;
/// everything else was caused by the user's input or account state.
fn is_internal(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            return api.is_internal();
        }
        cause.is::<CardError>() || cause.is::<std::io::Error>()
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = enable_ansi_support::enable_ansi_support() {
        log::debug!("ANSI support unavailable: {}", e);
    }

    if let Err(e) = run() {
        if is_internal(&e) {
            let mut message = e.to_string();
            let mut causes = e.chain().skip(1).peekable();
            if causes.peek().is_some() {
                message.push_str("\n\nCaused by:");
                for (indent, cause) in causes.enumerate() {
                    message.push_str(&format!("\n{:indent$}  {}", "", cause, indent = indent + 1));
                }
            }
            internal_error(&message);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
