// src/main.rs

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use seoinsikt::lifecycle;
use seoinsikt::{AnalysisOutcome, AnalysisRequest, AnalyzerConfig, EngagementMetrics, SeoAnalyzer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON of the full outcome
    Json,
    /// Human-readable summary
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "seoinsikt")]
#[command(about = "Analyze the on-page SEO of a single web page")]
#[command(version)]
struct Cli {
    /// Absolute URL of the page to analyze
    url: String,

    /// Focus keyword to measure on the page
    #[arg(short, long)]
    keyword: Option<String>,

    /// Bounce rate in percent (0-100)
    #[arg(long)]
    bounce_rate: Option<f64>,

    /// Average time on page in seconds
    #[arg(long)]
    time_on_page: Option<f64>,

    /// Average pages per session (at least 1)
    #[arg(long)]
    pages_per_session: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// User-Agent header sent with the request
    #[arg(long)]
    user_agent: Option<String>,

    /// JSON config file with analyzer defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (overrides RUST_LOG)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

impl Cli {
    fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::load(path)?,
            None => AnalyzerConfig::default(),
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        Ok(config)
    }

    fn engagement(&self, defaults: EngagementMetrics) -> EngagementMetrics {
        EngagementMetrics {
            bounce_rate: self.bounce_rate.unwrap_or(defaults.bounce_rate),
            time_on_page: self.time_on_page.unwrap_or(defaults.time_on_page),
            pages_per_session: self.pages_per_session.unwrap_or(defaults.pages_per_session),
        }
    }

    fn request(&self, config: &AnalyzerConfig) -> AnalysisRequest {
        AnalysisRequest {
            url: self.url.clone(),
            focus_keyword: self.keyword.clone(),
            engagement: self.engagement(config.engagement),
        }
    }
}

fn render_text(outcome: &AnalysisOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", outcome.message);

    let (Some(report), Some(score)) = (&outcome.report, &outcome.score) else {
        return out;
    };

    let _ = writeln!(out, "SEO Score: {}/100 ({})", score.value, score.band.as_str());

    let http = &report.http;
    let _ = writeln!(out, "\nHTTP Details");
    let _ = writeln!(out, "  Status Code: {}", http.status);
    let _ = writeln!(out, "  Using HTTPS: {}", http.using_https);
    let _ = writeln!(out, "  Content Size: {} KB", http.content_size.kb);
    let _ = writeln!(out, "  Response Time: {:.3} seconds", http.response_time);
    let _ = writeln!(out, "  Redirected: {}", http.redirected);

    for (label, info) in [("Title", &report.title), ("Meta Description", &report.meta_description)] {
        let _ = writeln!(out, "\n{}", label);
        let _ = writeln!(out, "  Found: {:?}", info.found);
        let _ = writeln!(out, "  Text: {}", info.data);
        let _ = writeln!(out, "  Length: {} characters, {} words", info.length, info.words);
        let _ = writeln!(out, "  Characters per Word: {}", info.chars_per_word);
    }

    let meta = &report.metadata;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "None".to_string());
    let _ = writeln!(out, "\nMetadata");
    let _ = writeln!(out, "  Charset: {}", meta.charset);
    let _ = writeln!(out, "  Canonical: {}", show(&meta.canonical));
    let _ = writeln!(out, "  Favicon: {}", show(&meta.favicon));
    let _ = writeln!(out, "  Viewport: {}", show(&meta.viewport));
    let _ = writeln!(out, "  Keywords: {}", show(&meta.keywords));
    let _ = writeln!(out, "  Robots: {}", show(&meta.robots));

    let _ = writeln!(out, "\nKeyword Analysis");
    match &outcome.keyword_analysis {
        Some(k) => {
            let _ = writeln!(out, "  Focus Keyword: {}", k.keyword);
            let _ = writeln!(out, "  Found: {} at {:?}", k.occurrences, k.positions);
            let _ = writeln!(out, "  Density: {:.2}%", k.density);
            let _ = writeln!(out, "  Frequency: {:.4}", k.frequency);
            let _ = writeln!(out, "  Type: {:?}", k.tail);
        }
        None => {
            let _ = writeln!(out, "  No focus keyword given");
        }
    }

    let _ = writeln!(out, "\nHeadings");
    for level in 1..=6u8 {
        let texts = report.headings.level(level);
        let _ = writeln!(out, "  H{} ({}): {}", level, texts.len(), texts.join(", "));
    }

    let wc = &report.word_count;
    let _ = writeln!(out, "\nWord Count");
    let _ = writeln!(out, "  Total Words: {}", wc.total);
    let _ = writeln!(out, "  Anchor Text Words: {}", wc.anchor_text_words);
    let _ = writeln!(out, "  Anchor Percentage: {}%", wc.anchor_percentage);

    let links = &report.links;
    let _ = writeln!(out, "\nLinks");
    let _ = writeln!(
        out,
        "  Total: {}, External: {}, Internal: {}, Nofollow: {}",
        links.total_links, links.external_links, links.internal_links, links.nofollow_count
    );
    for link in &links.links {
        let _ = writeln!(out, "    {}", link.href);
    }

    let images = &report.images;
    let _ = writeln!(out, "\nImages");
    let _ = writeln!(
        out,
        "  Total: {}, No src: {}, No alt: {}",
        images.total, images.no_src, images.no_alt
    );
    for image in &images.images {
        let _ = writeln!(out, "    {} | alt: {}", image.src, image.alt);
    }

    out
}

async fn run(cli: Cli) -> Result<bool> {
    let config = cli.analyzer_config()?;
    let request = cli.request(&config);

    let outcome = SeoAnalyzer::new(&config).analyze(&request).await;

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("Failed to serialize analysis outcome")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", render_text(&outcome)),
    }

    Ok(outcome.success)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    lifecycle::init_logging(cli.log_level.map(|l| l.as_str()));

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
