//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`,
//! serves `static/` locally, and (if asked and available) exposes it via ngrok.

#[cfg(not(target_arch = "wasm32"))]
mod serve {
    use std::process::{Command, ExitCode, Stdio};
    use std::{thread, time::Duration};

    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(name = "portfolio-serve", about = "Build and serve the portfolio site")]
    struct Args {
        /// Port for the local HTTP server
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Serve whatever is already in static/ without running wasm-pack
        #[arg(long)]
        skip_build: bool,

        /// Open an ngrok tunnel to the local server
        #[arg(long)]
        public: bool,
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        if !args.skip_build {
            log::info!("building WASM pkg");
            match Command::new("wasm-pack")
                .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
                .status()
            {
                Ok(st) if st.success() => {}
                Ok(_) => {
                    log::error!("wasm-pack finished with errors");
                    return ExitCode::FAILURE;
                }
                Err(_) => {
                    log::warn!("wasm-pack not found in PATH; serving existing static/pkg");
                }
            }
        }

        let port = args.port.to_string();
        log::info!("serving static/ at http://127.0.0.1:{port}");
        let server = Command::new("python3")
            .args(["-m", "http.server", &port, "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut server = match server {
            Ok(child) => child,
            Err(err) => {
                log::error!("failed to start http server: {err}");
                return ExitCode::FAILURE;
            }
        };

        if args.public {
            match Command::new("ngrok")
                .args(["http", &port])
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .spawn()
            {
                Ok(_) => log::info!("ngrok tunnel starting"),
                Err(_) => log::warn!("ngrok not found; site is only reachable locally"),
            }
        }

        loop {
            match server.try_wait() {
                Ok(Some(status)) => {
                    log::error!("http server exited: {status}");
                    return ExitCode::FAILURE;
                }
                Ok(None) => thread::sleep(Duration::from_secs(5)),
                Err(err) => {
                    log::error!("lost track of http server: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    serve::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
