use clap::Parser;
use docscope::core::export::{self, OutputFormat};
use docscope::domain::ports::{ConfigProvider, DoctorSource, ExportSink, UrlSync};
use docscope::utils::{logger, monitor::SystemMonitor, validation::Validate};
use docscope::{
    CliConfig, DirectoryEngine, DirectoryState, HttpDoctorSource, LocalExportSink, MemoryUrlBar,
    TomlConfig,
};
use std::collections::HashMap;
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::info!("Starting docscope CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let monitor = SystemMonitor::new(config.monitor);
    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 載入 TOML 設定檔
    let toml_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let file_config = match TomlConfig::from_file(path) {
                Ok(file_config) => file_config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            if let Err(e) = file_config.validate() {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            Some(file_config)
        }
        None => None,
    };

    // 端點與逾時:設定檔優先;顯示格式:明確的 --format 優先
    let (endpoint, timeout, headers) = match &toml_config {
        Some(file_config) => (
            file_config.api_endpoint().to_string(),
            file_config.request_timeout(),
            file_config.headers(),
        ),
        None => (
            config.api_endpoint.clone(),
            config.request_timeout(),
            HashMap::new(),
        ),
    };

    let format_name = if config.format != "table" {
        config.format.clone()
    } else {
        toml_config
            .as_ref()
            .and_then(|c| c.display_format())
            .unwrap_or("table")
            .to_string()
    };
    let format = OutputFormat::parse(&format_name)?;

    // 初始查詢字串:--query 或旗標;都沒有就用設定檔預設
    let mut seed_query = match config.seed_query() {
        Ok(seed_query) => seed_query,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if seed_query.is_empty() {
        if let Some(default_query) = toml_config.as_ref().and_then(|c| c.default_query()) {
            seed_query = default_query.to_string();
        }
    }

    // 組裝來源、網址列替身與引擎,掛載一次
    let source = HttpDoctorSource::new(endpoint)
        .with_timeout(timeout)
        .with_headers(headers);
    let url_bar = MemoryUrlBar::new(seed_query);
    let mut engine = DirectoryEngine::new(source, url_bar);

    engine.mount().await;

    if let DirectoryState::Failed(message) = engine.state() {
        eprintln!("❌ {}", message);
        eprintln!("💡 Check your network connection and run the command again");
        std::process::exit(1);
    }

    if config.interactive {
        run_session(&mut engine)?;
    } else {
        let visible = engine.visible();
        let rendered = match engine.state() {
            DirectoryState::Ready(directory) => export::render(format, &visible, directory)?,
            _ => unreachable!("mount leaves the engine Ready or exits on Failed"),
        };

        println!("{}", rendered);

        if let Some(output) = &config.output {
            let sink = LocalExportSink::new(".".to_string());
            sink.write_file(output, rendered.as_bytes()).await?;
            tracing::info!("✅ Output saved to: {}", output);
            println!("📁 Output saved to: {}", output);
        }
    }

    monitor.log_summary();

    Ok(())
}

/// 互動模式:每個指令對應一個 FilterState 轉換訊息,
/// 變更後立即顯示筆數與同步後的查詢字串
fn run_session<S: DoctorSource, U: UrlSync>(
    engine: &mut DirectoryEngine<S, U>,
) -> anyhow::Result<()> {
    println!("docscope interactive session - type 'help' for commands");
    print_summary(engine);

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            "list" => println!("{}", export::render_table(&engine.visible())),
            "url" => println!("?{}", engine.current_query()),
            "search" => {
                engine.set_search_term(rest);
                print_summary(engine);
            }
            "type" => {
                match rest {
                    "video" => engine.set_consultation_type(Some(
                        docscope::ConsultationMode::VideoConsult,
                    )),
                    "clinic" => {
                        engine.set_consultation_type(Some(docscope::ConsultationMode::InClinic))
                    }
                    "all" => engine.set_consultation_type(None),
                    other => {
                        println!("Unknown consultation type '{}' (video, clinic, all)", other);
                        continue;
                    }
                }
                print_summary(engine);
            }
            "spec" => {
                if rest.is_empty() {
                    println!("Specialties: {}", engine.specialties().join(", "));
                } else {
                    engine.toggle_specialty(rest);
                    print_summary(engine);
                }
            }
            "sort" => {
                match rest {
                    "fees" => engine.set_sort_by(Some(docscope::SortKey::Fees)),
                    "experience" => engine.set_sort_by(Some(docscope::SortKey::Experience)),
                    "none" => engine.set_sort_by(None),
                    other => {
                        println!("Unknown sort '{}' (fees, experience, none)", other);
                        continue;
                    }
                }
                print_summary(engine);
            }
            "suggest" => {
                let suggestions = engine.suggestions(rest);
                if suggestions.is_empty() {
                    println!("(no suggestions)");
                } else {
                    for suggestion in suggestions {
                        println!("{}", suggestion);
                    }
                }
            }
            other => println!("Unknown command '{}' (try 'help')", other),
        }
    }

    Ok(())
}

fn print_summary<S: DoctorSource, U: UrlSync>(engine: &DirectoryEngine<S, U>) {
    let count = engine.visible().len();
    let noun = if count == 1 { "doctor" } else { "doctors" };
    println!("{} {} found | ?{}", count, noun, engine.current_query());
}

fn print_help() {
    println!("Commands:");
    println!("  search <term>        set the search term (empty to clear)");
    println!("  type video|clinic|all  filter by consultation mode");
    println!("  spec [<name>]        toggle a specialty filter; no argument lists options");
    println!("  sort fees|experience|none  sort the visible list");
    println!("  suggest <partial>    autocomplete candidates (max 3)");
    println!("  list                 print the visible doctors");
    println!("  url                  print the current query string");
    println!("  quit                 leave the session");
}
