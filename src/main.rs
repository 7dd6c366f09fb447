use clap::Parser;
use okr_eval::utils::{logger, validation::Validate};
use okr_eval::{
    describe_score, has_role, render_stars, star_label, star_to_score, AppConfig, CliConfig,
    Command, EventTracker, LocalStorage, OkrError, SessionStore, UserInfo,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置
    let mut config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        },
        None => AppConfig::default(),
    };

    if let Some(dir) = &cli.storage_dir {
        config.storage.base_path = dir.clone();
    }

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let tracker = EventTracker::new(config.monitoring_enabled());
    let store = SessionStore::with_key(
        LocalStorage::new(&config.storage.base_path),
        config.storage.session_key.clone(),
    );

    let result = run(&cli.command, &config, &store, &tracker);
    if let Err(e) = &result {
        let category = format!("{:?}", e.category());
        tracker.capture_error(&e.to_string(), Some(category.as_str()));
    }

    let reported = tracker.flush();
    if reported > 0 {
        tracing::debug!("Reported {} tracked event(s)", reported);
    }

    if let Err(e) = result {
        fail(&e);
    }

    Ok(())
}

fn run(
    command: &Command,
    config: &AppConfig,
    store: &SessionStore<LocalStorage>,
    tracker: &EventTracker,
) -> okr_eval::Result<()> {
    match command {
        Command::Score { tier } => {
            println!("{}", star_to_score(*tier));
        }
        Command::Stars { score } => {
            let row = describe_score(*score);
            tracker.track_event("score_converted", Some(score.to_string().as_str()));
            println!("{} {} ({})", render_stars(row.tier), row.tier, row.label);
        }
        Command::Label { tier } => match star_label(*tier) {
            Some(label) => println!("{}", label),
            None => {
                tracing::warn!("No label for tier {}", tier);
                println!("-");
            }
        },
        Command::Login { user_info } => {
            let user: UserInfo = serde_json::from_str(user_info)?;
            store.save(&user)?;
            tracker.track_event("login", user.display_name());
            println!("✅ Logged in as {}", user.display_name().unwrap_or("<anonymous>"));
        }
        Command::Logout => {
            store.clear()?;
            tracker.track_event("logout", None);
            println!("✅ Logged out");
        }
        Command::Whoami => match store.load()? {
            Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
            None => println!("No active session"),
        },
        Command::HasRole { role } => {
            let user = store.load()?;
            println!("{}", has_role(user.as_ref(), role));
        }
        Command::IsOwner => {
            let user = store.load()?;
            println!("{}", config.owner_identity().matches(user.as_ref()));
        }
        Command::Access { path } => {
            let user = store.load()?;
            let decision = config.route_guard().check(path, user.as_ref());
            tracker.track_page_view(path, user.as_ref());
            match decision.redirect() {
                None => println!("granted"),
                Some(target) => println!("{:?} -> {}", decision, target),
            }
        }
    }
    Ok(())
}

fn fail(e: &OkrError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}
