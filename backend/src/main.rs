use moon::*;
use shared::PortfolioConfig;

// ===== CENTRALIZED DEBUG FLAGS =====
const DEBUG_BACKEND: bool = false; // Incoming request debugging

macro_rules! debug_log {
    ($flag:expr, $($arg:tt)*) => {
        if $flag {
            println!($($arg)*);
        }
    };
}

async fn frontend() -> Frontend {
    Frontend::new()
        .title("Portfolio")
        .index_by_robots(true)
}

// The site is fully client-side; the contact form simulates its send.
async fn up_msg_handler(req: UpMsgRequest<()>) {
    debug_log!(
        DEBUG_BACKEND,
        "Ignoring message from session {:?} (cor {:?})",
        req.session_id,
        req.cor_id
    );
}

#[moon::main]
async fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        println!("BACKEND PANIC: {:?}", panic_info);
    }));

    println!("Serving portfolio v{}", PortfolioConfig::default().app.version);

    start(frontend, up_msg_handler, |_error| {
        debug_log!(DEBUG_BACKEND, "Session error");
    })
    .await
}
