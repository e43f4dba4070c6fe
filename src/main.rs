use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use pipeline_desk::board::BoardFilter;
use pipeline_desk::cli::{Cli, Command};
use pipeline_desk::config::DeskConfig;
use pipeline_desk::error::DeskError;
use pipeline_desk::gateway::{ApplicantId, HttpGateway, ResumeUpload};
use pipeline_desk::ui::{self, Progress};
use pipeline_desk::{BulkStatusAction, Dashboard, telemetry};

type Desk = Dashboard<HttpGateway>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} error: {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), DeskError> {
    let config = DeskConfig::load().map_err(|e| DeskError::Config(e.to_string()))?;
    telemetry::init(cli.verbose, Some(config.log_level.as_str()))
        .map_err(|e| DeskError::Config(e.to_string()))?;

    let base_url = cli.base_url.clone().unwrap_or_else(|| config.base_url.clone());
    let gateway = HttpGateway::with_connect_timeout(base_url, config.connect_timeout())?;
    let mut desk = Dashboard::new(gateway, config.schedule());

    let progress = Progress::start("Loading pipeline...");
    if let Err(e) = desk.reload().await {
        progress.failure("Could not reach the recruiting service");
        return Err(e.into());
    }
    progress.success(&format!("{} applicants loaded", desk.store().len()));

    let result = dispatch(&mut desk, cli.command).await;
    ui::print_notices(&desk.take_notices());
    desk.shutdown();
    result
}

async fn dispatch(desk: &mut Desk, command: Command) -> Result<(), DeskError> {
    match command {
        Command::List { status, min_score } => {
            let filter = BoardFilter {
                status: status.map(Into::into),
                min_score,
            };
            if let Some(job) = desk.store().job() {
                ui::print_job(job);
            }
            let visible = desk.visible(&filter);
            ui::print_applicants(&visible);
            println!("{} shown of {}", visible.len(), desk.store().len());
        }
        Command::Summary => {
            let summary = desk.summary();
            let job = desk.store().job().cloned();
            ui::print_summary(job.as_ref(), &summary);
        }
        Command::ScoreAll => {
            let progress = Progress::start("AI scoring in progress...");
            let summary = desk.score_all().await?;
            progress.success(&format!("Scored {} candidates", summary.scored));
        }
        Command::Move { id, status } => {
            let id = resolve(desk, &id)?;
            desk.change_status(&id, status.into()).await?;
            let now = desk.applicant(&id).map(|a| a.status.label()).unwrap_or("—");
            println!("{id} → {now}");
        }
        Command::Invite { ids, yes, wait } => invite(desk, &ids, yes, wait).await?,
        Command::Book { ids } => bulk(desk, &ids, BulkStatusAction::BookInterview).await?,
        Command::Reject { ids } => bulk(desk, &ids, BulkStatusAction::Reject).await?,
        Command::Sync => {
            let progress = Progress::start("Syncing with Paycom...");
            let report = desk.resync().await?;
            progress.success(&format!("{} applicants pulled", report.applicant_count));
        }
        Command::Reply { id, message } => {
            let id = resolve(desk, &id)?;
            desk.open_panel(&id);
            let email = desk.applicant(&id).map(|a| a.email).unwrap_or_default();
            match desk.draft_reply(&message).await? {
                Some(draft) => ui::print_reply_draft(&email, &draft),
                None => println!("Nothing to reply to: message is empty."),
            }
        }
        Command::Upload {
            first_name,
            last_name,
            email,
            location,
            distance,
            resume_file,
        } => {
            let resume_text = std::fs::read_to_string(&resume_file)?;
            let receipt = desk
                .upload_resume(ResumeUpload {
                    first_name,
                    last_name,
                    email,
                    location,
                    distance_miles: distance,
                    resume_text,
                })
                .await?;
            let score = receipt
                .score_data
                .map(|s| format!("{}/{} {}", s.score, s.max_score, s.recommendation))
                .unwrap_or_else(|| "not scored".to_string());
            println!("{} ({}): {score}", receipt.applicant.display_name(), receipt.applicant.id);
        }
    }
    Ok(())
}

fn resolve(desk: &Desk, raw: &str) -> Result<ApplicantId, DeskError> {
    let id = ApplicantId::from(raw.trim());
    if desk.store().contains(&id) {
        Ok(id)
    } else {
        Err(DeskError::ApplicantNotFound(raw.to_string()))
    }
}

fn select_all(desk: &mut Desk, raw: &[String]) -> Result<(), DeskError> {
    desk.clear_selection();
    for r in raw {
        let id = resolve(desk, r)?;
        desk.select(&id);
    }
    Ok(())
}

async fn bulk(desk: &mut Desk, raw: &[String], action: BulkStatusAction) -> Result<(), DeskError> {
    select_all(desk, raw)?;
    let outcome = desk.bulk_action(action).await?;
    for r in &outcome.results {
        match &r.calendar_event {
            Some(ev) => println!("  {} — {} {} · {}", r.name, ev.date, ev.time, ev.location),
            None => println!("  {} — {}", r.name, r.message),
        }
    }
    Ok(())
}

async fn invite(desk: &mut Desk, raw: &[String], yes: bool, wait: bool) -> Result<(), DeskError> {
    select_all(desk, raw)?;
    let previews = desk.preview_and_send().await?;
    ui::print_previews(previews);

    if !yes && !confirm(&format!("Send {} invite(s)?", previews.len()))? {
        desk.discard_previews();
        println!("Nothing sent.");
        return Ok(());
    }

    let report = desk.confirm_send().await?;
    ui::print_send_report(&report);

    if wait && !report.scheduled.is_empty() {
        let progress = Progress::start("Waiting for simulated responses...");
        while desk.scheduler().live_count() > 0 {
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
        progress.success("All responses resolved");
        ui::print_notifications(&desk.scheduler().notifications());
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool, DeskError> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
