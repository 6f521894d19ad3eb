use arbsheet::{
    Catalog, ConverterConfig, FilePattern, Selector, SheetError, SheetResult, Status,
    TemplateConfig, convert, flatten, generate, load_catalog_from_file, load_documents_from_dir,
    package,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let catalog_arg = Arg::new("catalog")
        .long("catalog")
        .short('c')
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .help("JSON language catalog (default: built-in list)");

    let pattern_arg = Arg::new("pattern")
        .long("pattern")
        .short('p')
        .value_name("PATTERN")
        .default_value(arbsheet::config::DEFAULT_FILE_PATTERN)
        .help("Resource file name pattern, {code} is replaced by the language");

    Command::new("arbsheet")
        .version("0.1.0")
        .about("Spreadsheet translation templates and CSV to ARB conversion")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Show debug logging")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("languages")
                .about("List catalog languages")
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .short('f')
                        .help("Only languages whose name or code contains this text"),
                )
                .arg(catalog_arg.clone()),
        )
        .subcommand(
            Command::new("template")
                .about("Generate a seed CSV wired with GOOGLETRANSLATE formulas")
                .arg(
                    Arg::new("base")
                        .long("base")
                        .short('b')
                        .default_value("en")
                        .help("Base language code (column B)"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .short('t')
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .help("Toggle target languages, comma separated (e.g. es,fr)"),
                )
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .short('f')
                        .help("Filter the language list before --all"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .short('a')
                        .help("Toggle every language in the filtered list")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("key")
                        .long("key")
                        .short('k')
                        .action(ArgAction::Append)
                        .help("Seed key, repeatable (default: greeting)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Output file (default: translations_sample.csv)"),
                )
                .arg(catalog_arg),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a translated CSV into a ZIP of ARB files")
                .arg(
                    Arg::new("input")
                        .help("CSV file with a key column and one column per language")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Output archive (default: arb_files.zip)"),
                )
                .arg(pattern_arg.clone()),
        )
        .subcommand(
            Command::new("flatten")
                .about("Turn a directory of ARB files back into a CSV")
                .arg(
                    Arg::new("dir")
                        .help("Directory holding the resource files")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Output CSV (default: stdout)"),
                )
                .arg(pattern_arg),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(matches: &ArgMatches) -> SheetResult<Catalog> {
    match matches.get_one::<PathBuf>("catalog") {
        Some(path) => load_catalog_from_file(path),
        None => Ok(Catalog::builtin()),
    }
}

fn file_pattern(matches: &ArgMatches) -> SheetResult<FilePattern> {
    match matches.get_one::<String>("pattern") {
        Some(pattern) => FilePattern::new(pattern),
        None => Ok(FilePattern::default()),
    }
}

async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> SheetResult<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| SheetError::IoError(format!("Failed to write '{}': {}", path.display(), e)))
}

fn run_languages(matches: &ArgMatches) -> SheetResult<Status> {
    let catalog = load_catalog(matches)?;
    let query = matches
        .get_one::<String>("filter")
        .map(String::as_str)
        .unwrap_or("");

    for language in catalog.filter(query) {
        println!("{:<5} {}", language.code, language.name);
    }
    Ok(Status::Idle)
}

/// Apply the selection flags in the order a user would click them:
/// filter, select all, then individual toggles.
fn select_targets(matches: &ArgMatches, catalog: Catalog) -> SheetResult<Selector> {
    let mut selector = Selector::new(catalog);

    if let Some(query) = matches.get_one::<String>("filter") {
        selector.set_filter(query);
    }
    if matches.get_flag("all") {
        selector.toggle_all_visible();
    }
    if let Some(targets) = matches.get_many::<String>("target") {
        for code in targets {
            selector.toggle(code.trim())?;
        }
    }

    debug!(selected = ?selector.selected_codes(), "targets selected");
    Ok(selector)
}

async fn run_template(matches: &ArgMatches) -> SheetResult<Status> {
    let defaults = TemplateConfig::default();
    let selector = select_targets(matches, load_catalog(matches)?)?;

    let base = matches
        .get_one::<String>("base")
        .map(String::as_str)
        .unwrap_or("en");
    if !selector.catalog().contains(base) {
        warn!(base, "base language is not in the catalog");
    }

    let keys: Vec<String> = match matches.get_many::<String>("key") {
        Some(keys) => keys.cloned().collect(),
        None => defaults.seed_keys,
    };
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&defaults.file_name));

    let csv = generate(base, selector.selected_codes(), &keys)?;
    write_file(&output, csv).await?;

    Ok(Status::Done(format!("Done. Wrote {}", output.display())))
}

async fn run_convert(matches: &ArgMatches) -> SheetResult<Status> {
    let config = ConverterConfig {
        file_pattern: file_pattern(matches)?,
        ..ConverterConfig::default()
    };
    let input = matches
        .get_one::<PathBuf>("input")
        .ok_or_else(|| SheetError::IoError("No input file given".to_string()))?;
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&config.archive_name));

    let bytes = tokio::fs::read(input)
        .await
        .map_err(|e| SheetError::IoError(format!("Failed to read '{}': {}", input.display(), e)))?;

    println!("{}", Status::Parsing);

    // A panic inside the conversion surfaces as ConversionFailed
    let (languages, archive) = tokio::task::spawn_blocking(move || {
        let bundle = convert(&bytes)?;
        let unevaluated = bundle.unevaluated_formulas().len();
        if unevaluated > 0 {
            warn!(
                cells = unevaluated,
                "sheet still contains formulas; export values after the spreadsheet evaluates them"
            );
        }
        let archive = package(&bundle, &config)?;
        Ok::<_, SheetError>((bundle.len(), archive))
    })
    .await
    .map_err(|e| SheetError::ConversionFailed(e.to_string()))??;

    write_file(&output, archive).await?;

    Ok(Status::Done(format!(
        "Done. Wrote {} ({} languages)",
        output.display(),
        languages
    )))
}

async fn run_flatten(matches: &ArgMatches) -> SheetResult<Status> {
    let pattern = file_pattern(matches)?;
    let dir = matches
        .get_one::<PathBuf>("dir")
        .ok_or_else(|| SheetError::IoError("No directory given".to_string()))?;

    let documents = load_documents_from_dir(dir, &pattern)?;
    let csv = flatten(&documents)?;

    match matches.get_one::<PathBuf>("output") {
        Some(output) => {
            write_file(output, csv).await?;
            Ok(Status::Done(format!(
                "Done. Wrote {} ({} languages)",
                output.display(),
                documents.len()
            )))
        }
        None => {
            print!("{}", csv);
            Ok(Status::Idle)
        }
    }
}

async fn run(matches: &ArgMatches) -> SheetResult<Status> {
    match matches.subcommand() {
        Some(("languages", sub)) => run_languages(sub),
        Some(("template", sub)) => run_template(sub).await,
        Some(("convert", sub)) => run_convert(sub).await,
        Some(("flatten", sub)) => run_flatten(sub).await,
        Some((other, _)) => Err(SheetError::IoError(format!("Unknown command: {}", other))),
        None => Err(SheetError::IoError("No command given".to_string())),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches).await {
        Ok(status) => {
            if status != Status::Idle {
                println!("{}", status);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            println!("{}", Status::from(err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn matches_for(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["arbsheet"];
        argv.extend_from_slice(args);
        cli().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_select_targets_order_of_operations() {
        let matches = matches_for(&["template", "--filter", "slov", "--all", "-t", "fr,sk"]);
        let (_, sub) = matches.subcommand().unwrap();
        let selector = select_targets(sub, Catalog::builtin()).unwrap();
        // --all picks sk and sl, then -t toggles fr on and sk off
        assert_eq!(selector.selected_codes(), ["sl", "fr"]);
    }

    #[test]
    fn test_select_targets_unknown_code() {
        let matches = matches_for(&["template", "-t", "xx"]);
        let (_, sub) = matches.subcommand().unwrap();
        assert!(matches!(
            select_targets(sub, Catalog::builtin()),
            Err(SheetError::InvalidCode(code)) if code == "xx"
        ));
    }

    #[tokio::test]
    async fn test_template_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sample.csv");
        let matches = matches_for(&[
            "template",
            "-t",
            "es,fr",
            "-o",
            output.to_str().unwrap(),
        ]);

        let status = run(&matches).await.unwrap();
        assert!(matches!(status, Status::Done(_)));

        let csv = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            csv,
            "\"key\",\"en\",\"es\",\"fr\"\n\"greeting\",\"\",=GOOGLETRANSLATE($B2;\"en\";\"es\"),=GOOGLETRANSLATE($B2;\"en\";\"fr\")"
        );
    }

    #[tokio::test]
    async fn test_template_without_targets_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sample.csv");
        let matches = matches_for(&["template", "-t", "en", "-o", output.to_str().unwrap()]);

        assert_eq!(run(&matches).await, Err(SheetError::EmptyTargetSet));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_convert_writes_archive() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.zip");
        std::fs::write(&input, "key,en,es\ngreeting,Hello,Hola\nbye,Bye,\n").unwrap();

        let matches = matches_for(&[
            "convert",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        let status = run(&matches).await.unwrap();
        assert!(status.to_string().contains("2 languages"));

        let bytes = std::fs::read(&output).unwrap();
        let mut zip = zip_reader(&bytes);
        let mut content = String::new();
        zip.by_name("app_es.arb")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "{\n  \"greeting\": \"Hola\"\n}");
    }

    #[tokio::test]
    async fn test_convert_bad_header_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.zip");
        std::fs::write(&input, "name,en\ngreeting,Hello\n").unwrap();

        let matches = matches_for(&[
            "convert",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        assert_eq!(run(&matches).await, Err(SheetError::MissingKeyColumn));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_flatten_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app_en.arb"), r#"{"greeting": "Hello"}"#).unwrap();
        std::fs::write(dir.path().join("app_es.arb"), r#"{"greeting": "Hola"}"#).unwrap();
        let output = dir.path().join("flat.csv");

        let matches = matches_for(&[
            "flatten",
            dir.path().to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        run(&matches).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "key,en,es\ngreeting,Hello,Hola\n"
        );
    }

    fn zip_reader(bytes: &[u8]) -> zip::ZipArchive<Cursor<&[u8]>> {
        zip::ZipArchive::new(Cursor::new(bytes)).unwrap()
    }
}
