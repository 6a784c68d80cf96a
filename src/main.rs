use clap::Parser;
use timegrid::application::{add_entry, init::init, list_entries, month_view, ConfigService};
use timegrid::cli::{format_entry_list, format_month_grid, run_session, Cli, Commands};
use timegrid::domain::{CalendarDate, EntryDraft, TaskRefs, ThemeInfo, YearMonth};
use timegrid::error::TimegridError;
use timegrid::infrastructure::FileSystemRepository;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("TIMEGRID_LOG", "warn"))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), TimegridError> {
    match cli.command {
        Commands::Init { path, user } => {
            let config = init(&path, user)?;
            println!("Initialized timegrid timesheet at {}", path.display());
            println!("User: {}", config.user);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("user = {}", config.user);
                println!("workday_hours = {}", config.workday_hours);
                println!("poll_interval_secs = {}", config.poll_interval_secs);
                println!("created = {}", config.created.to_rfc3339());
                for theme in &config.themes {
                    println!("theme {} = {} ({})", theme.id, theme.name, theme.color);
                }
                for template in &config.templates {
                    println!("template {} ({} line(s))", template.name, template.lines.len());
                }
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: timegrid config [--list | <key> [<value>]]");
                println!("Valid keys: user, workday_hours, poll_interval_secs, created");
                Ok(())
            }
        }
        Commands::Theme { id, name, color } => {
            let repo = FileSystemRepository::discover()?;
            ConfigService::new(repo).upsert_theme(ThemeInfo {
                id: id.clone(),
                name: name.clone(),
                color,
            })?;
            println!("Theme {} = {}", id, name);
            Ok(())
        }
        Commands::Add {
            date,
            theme,
            task,
            hours,
            description,
            group,
            project,
        } => {
            let mut repo = FileSystemRepository::discover()?;
            let refs = TaskRefs {
                group_id: group,
                project_id: project,
                theme_id: theme,
                task_id: task,
            };
            let mut draft = EntryDraft::new(CalendarDate::parse(&date)?, refs, hours);
            draft.description = description;

            let entry = add_entry(&mut repo, draft)?;
            println!("Saved {} ({}h on {})", entry.id, entry.hours, entry.date);
            Ok(())
        }
        Commands::List { month } => {
            let repo = FileSystemRepository::discover()?;
            let month = month.as_deref().map(YearMonth::parse).transpose()?;
            let entries = list_entries(&repo, month)?;
            print!("{}", format_entry_list(&entries));
            if entries.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Month { month } => {
            let repo = FileSystemRepository::discover()?;
            let data = month_view(&repo, YearMonth::parse(&month)?)?;
            println!("{}", format_month_grid(&data).trim_end());
            Ok(())
        }
        Commands::Session => {
            let mut repo = FileSystemRepository::discover()?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            run_session(&mut repo, stdin.lock(), &mut stdout)
        }
    }
}
