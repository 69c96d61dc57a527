//! tutors-time - Time-on-task calendars for Tutors courses

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tutors_time::{
    Result, ViewKind,
    cli::{Cli, Command},
    output::{CourseReport, get_formatter},
    source::CourseTimeService,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("tutors_time=info,tutors_time_source=info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let range = cli.date_range()?;
    let service = CourseTimeService::from_arc(cli.source.open()?);
    let color = !cli.no_color && is_terminal::is_terminal(std::io::stdout());
    let formatter = get_formatter(cli.json, color);

    match &cli.command {
        Command::Course { ids, view } => {
            info!("Running course report");
            let courses = service.load_many(ids, &range).await?;
            let reports: Vec<CourseReport<'_>> = courses
                .iter()
                .map(|course| CourseReport::new(course.id.as_str(), &course.title, &course.model))
                .collect();
            println!("{}", formatter.format_reports(&reports, &view.kinds()));
        }
        Command::Student { course, student } => {
            info!("Running student report");
            let calendar = service
                .load_student_calendar(course, student, &range)
                .await?;
            let heading = format!("{} / {}", calendar.title, calendar.student_id);
            let report = CourseReport::new(calendar.course_id.as_str(), &heading, &calendar.model);
            println!(
                "{}",
                formatter.format_report(&report, &[ViewKind::Day, ViewKind::Week])
            );
        }
    }

    Ok(())
}
