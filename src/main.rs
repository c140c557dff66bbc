use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use online_courses_analyzer::{report, Config, CourseAnalyzer, CourseTable, Metric};
use std::path::Path;

fn cli() -> Command {
    Command::new("online-courses-analyzer")
        .version("1.0")
        .about("Analyzes online course offerings and recommends courses")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml")
                .global(true),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .value_name("CSV")
                .help("Course dataset path (overrides dataset_path in the config)")
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(Command::new("institutions").about("Participants per institution"))
        .subcommand(Command::new("subjects").about("Participants per institution and subject list"))
        .subcommand(Command::new("subject-totals").about("Participants per individual subject"))
        .subcommand(Command::new("instructors").about("Solo and co-taught courses per instructor"))
        .subcommand(
            Command::new("top")
                .about("Top courses by hours or participants")
                .arg(
                    Arg::new("k")
                        .short('k')
                        .long("k")
                        .value_parser(value_parser!(usize))
                        .help("Number of titles (defaults to top_k from the config)"),
                )
                .arg(
                    Arg::new("by")
                        .long("by")
                        .default_value("participants")
                        .help("hours | participants"),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Search courses by subject, audited rate and total hours")
                .arg(Arg::new("subject").long("subject").required(true))
                .arg(
                    Arg::new("min-audited")
                        .long("min-audited")
                        .value_parser(value_parser!(f64))
                        .required(true),
                )
                .arg(
                    Arg::new("max-hours")
                        .long("max-hours")
                        .value_parser(value_parser!(f64))
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("recommend")
                .about("Recommend courses for a user profile")
                .arg(
                    Arg::new("age")
                        .long("age")
                        .value_parser(value_parser!(u32))
                        .required(true),
                )
                .arg(
                    Arg::new("gender")
                        .long("gender")
                        .value_parser(value_parser!(u8).range(0..=1))
                        .help("1 for male, 0 otherwise")
                        .required(true),
                )
                .arg(
                    Arg::new("bachelor")
                        .long("bachelor")
                        .value_parser(value_parser!(u8).range(0..=1))
                        .help("1 for a bachelor's degree or higher, 0 otherwise")
                        .required(true),
                ),
        )
        .subcommand(Command::new("report").about("Write every query result as CSV to the output directory"))
        .subcommand(
            Command::new("list")
                .about("Print loaded course runs")
                .arg(
                    Arg::new("course-number")
                        .long("course-number")
                        .help("Only runs of this course number"),
                ),
        )
        .subcommand(Command::new("init-config").about("Write a default configuration file"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    let config_file = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config.toml");

    if let Some(("init-config", _)) = matches.subcommand() {
        Config::default().save_to_file(config_file)?;
        println!("📝 Wrote default configuration file: {}", config_file);
        return Ok(());
    }

    let config = if Path::new(config_file).exists() {
        log::info!("Loading configuration from {}", config_file);
        Config::load_from_file(config_file)
            .with_context(|| format!("Failed to load configuration: {}", config_file))?
    } else {
        Config::default()
    };

    let dataset = match matches.get_one::<String>("dataset").or(config.dataset_path.as_ref()) {
        Some(path) => path.clone(),
        None => bail!("No dataset given: pass --dataset or set dataset_path in {}", config_file),
    };

    let table = CourseTable::load(&dataset).with_context(|| format!("Failed to load dataset: {}", dataset))?;
    let analyzer = CourseAnalyzer::new(&table);

    match matches.subcommand() {
        Some(("institutions", _)) => {
            println!("🏛️  Participants by institution:");
            for (institution, total) in analyzer.participation_by_institution() {
                println!("   {}: {}", institution, total);
            }
        }
        Some(("subjects", _)) => {
            println!("📚 Participants by institution and subjects:");
            for (key, total) in analyzer.participation_by_institution_subject() {
                println!("   {}: {}", key, total);
            }
        }
        Some(("subject-totals", _)) => {
            println!("📚 Participants by subject:");
            for (subject, total) in analyzer.participation_by_subject() {
                println!("   {}: {}", subject, total);
            }
        }
        Some(("instructors", _)) => print_instructors(&analyzer),
        Some(("top", sub)) => {
            let k = sub.get_one::<usize>("k").copied().unwrap_or(config.top_k);
            let by = sub.get_one::<String>("by").map(String::as_str).unwrap_or("participants");
            let metric = Metric::from(by);
            if !by.eq_ignore_ascii_case("hours") && !by.eq_ignore_ascii_case("participants") {
                log::warn!("Unknown ranking {:?}, ranking by participants", by);
            }
            println!("🏆 Top {} courses by {:?}:", k, metric);
            print_titles(&analyzer.top_courses(k, metric));
        }
        Some(("search", sub)) => print_search(&analyzer, sub),
        Some(("recommend", sub)) => {
            let age = sub.get_one::<u32>("age").copied().unwrap_or_default();
            let male = sub.get_one::<u8>("gender").copied().unwrap_or_default() == 1;
            let bachelor = sub.get_one::<u8>("bachelor").copied().unwrap_or_default() == 1;
            println!("🎯 Recommended courses:");
            print_titles(&analyzer.recommend(age, male, bachelor));
        }
        Some(("report", _)) => {
            let output_dir = config.output_directory.as_deref().unwrap_or("output");
            let written = report::generate_reports(&analyzer, Path::new(output_dir), config.top_k)?;
            for path in written {
                println!("   📄 {}", path.display());
            }
            println!("✅ Reports written to {}", output_dir);
        }
        Some(("list", sub)) => {
            let runs: Vec<_> = match sub.get_one::<String>("course-number") {
                Some(number) => table.runs_of(number),
                None => table.courses().iter().collect(),
            };
            for course in &runs {
                println!("{:?}", course);
            }
            println!("📊 {} of {} course runs", runs.len(), table.len());
        }
        Some((other, _)) => bail!("Unknown command: {}", other),
        None => bail!("No command given"),
    }

    Ok(())
}

fn print_titles(titles: &[String]) {
    if titles.is_empty() {
        println!("   (none)");
    }
    for (i, title) in titles.iter().enumerate() {
        println!("   {}. {}", i + 1, title);
    }
}

fn print_instructors(analyzer: &CourseAnalyzer) {
    println!("👩‍🏫 Courses by instructor:");
    for (name, courses) in analyzer.instructor_course_lists() {
        println!("   {}", name);
        println!("      solo: [{}]", courses.solo.join(", "));
        println!("      co-taught: [{}]", courses.co_taught.join(", "));
    }
}

fn print_search(analyzer: &CourseAnalyzer, sub: &ArgMatches) {
    let subject = sub.get_one::<String>("subject").map(String::as_str).unwrap_or_default();
    let min_audited = sub.get_one::<f64>("min-audited").copied().unwrap_or(0.0);
    let max_hours = sub.get_one::<f64>("max-hours").copied().unwrap_or(f64::MAX);
    println!(
        "🔍 Courses on {:?} with audited ≥ {} and hours ≤ {}:",
        subject, min_audited, max_hours
    );
    print_titles(&analyzer.search_courses(subject, min_audited, max_hours));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_recommend_arguments() {
        let matches = cli()
            .try_get_matches_from(["online-courses-analyzer", "-d", "data.csv", "recommend", "--age", "28", "--gender", "1", "--bachelor", "0"])
            .expect("valid args");
        assert_eq!(matches.get_one::<String>("dataset").map(String::as_str), Some("data.csv"));
        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "recommend");
        assert_eq!(sub.get_one::<u32>("age"), Some(&28));
        assert_eq!(sub.get_one::<u8>("gender"), Some(&1));
    }

    #[test]
    fn rejects_non_binary_gender() {
        let result = cli().try_get_matches_from(["online-courses-analyzer", "recommend", "--age", "28", "--gender", "2", "--bachelor", "0"]);
        assert!(result.is_err());
    }
}
