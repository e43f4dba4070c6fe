//! Interface de terminal do painel — spinners e saída colorida.
//!
//! Usa as crates `indicatif` para spinners de progresso e `console` para
//! estilização com cores. O [`Progress`] acompanha visualmente uma chamada
//! ao serviço remoto; as funções `print_*` renderizam tabelas no stdout.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::board::{CONSIDER_SCORE, PipelineSummary, STRONG_HIRE_SCORE};
use crate::dashboard::SendReport;
use crate::gateway::{Applicant, DeliveryMode, EmailPreview, JobPosting, ReplyDraft};
use crate::pipeline::ApplicantStatus;
use crate::scheduler::ResponseNotification;

/// Indicador visual de progresso para uma chamada remota no terminal.
///
/// Exibe um spinner animado enquanto a chamada está pendente e mensagens
/// coloridas para sucesso (verde) e falha (vermelho).
pub struct Progress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para mensagens de falha.
    red: Style,
}

impl Progress {
    /// Inicia o spinner com a mensagem informada.
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    /// Atualiza a mensagem do spinner.
    pub fn update(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finaliza o spinner com sucesso.
    pub fn success(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.green.apply_to("✓"));
    }

    /// Finaliza o spinner com falha.
    pub fn failure(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }
}

/// Estilo da nota: verde (contratar), amarelo (considerar), vermelho (fraco).
fn score_style(score: u32) -> Style {
    if score >= STRONG_HIRE_SCORE {
        Style::new().green().bold()
    } else if score >= CONSIDER_SCORE {
        Style::new().yellow()
    } else {
        Style::new().red()
    }
}

fn status_style(status: ApplicantStatus) -> Style {
    match status {
        ApplicantStatus::Hired | ApplicantStatus::Booked => Style::new().green(),
        ApplicantStatus::Rejected => Style::new().red(),
        ApplicantStatus::AwaitingReply => Style::new().magenta(),
        ApplicantStatus::Shortlisted => Style::new().cyan(),
        ApplicantStatus::New | ApplicantStatus::Reviewing => Style::new().dim(),
    }
}

/// Imprime o cabeçalho da vaga.
pub fn print_job(job: &JobPosting) {
    let bold = Style::new().bold();
    println!("{}", bold.apply_to(&job.title));
    println!("{} · {} · {}", job.location, job.season, job.employment_type);
}

/// Imprime a tabela de candidatos.
pub fn print_applicants(applicants: &[Applicant]) {
    if applicants.is_empty() {
        println!("  (nenhum candidato)");
        return;
    }
    println!(
        "{:<10} {:<24} {:>7} {:<16} {:>6}  {}",
        "ID", "Name", "Score", "Status", "Miles", "Reply"
    );
    for a in applicants {
        let score = match a.score() {
            Some(s) => score_style(s).apply_to(format!("{s:>3}/100")).to_string(),
            None => format!("{:>7}", "—"),
        };
        let reply = a
            .response_data
            .as_ref()
            .map(|r| format!("{}/{} {}", r.score, r.max_score, r.recommendation))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:<10} {:<24} {} {} {:>6.1}  {}",
            a.id,
            a.display_name(),
            score,
            status_style(a.status).apply_to(format!("{:<16}", a.status.label())),
            a.distance_miles,
            reply
        );
    }
}

/// Imprime o resumo do pipeline por estágio.
pub fn print_summary(job: Option<&JobPosting>, summary: &PipelineSummary) {
    if let Some(job) = job {
        print_job(job);
        println!();
    }
    println!("{:<16} {:>5} {:>9}", "Stage", "Count", "Top");
    for stage in &summary.stages {
        if stage.count == 0 && !stage.status.is_terminal() {
            continue;
        }
        let top = stage
            .top_score
            .map(|s| score_style(s).apply_to(format!("{s}/100")).to_string())
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{} {:>5} {:>9}",
            status_style(stage.status).apply_to(format!("{:<16}", stage.status.label())),
            stage.count,
            top
        );
    }
    println!();
    println!(
        "{} total · {} loaded · {} scored · {} shortlisted",
        summary.total, summary.loaded, summary.scored, summary.shortlisted
    );
    if let Some((name, score)) = &summary.top_candidate {
        println!("Top candidate: {name} ({})", score_style(*score).apply_to(score));
    }
}

/// Imprime as prévias de e-mail mantidas para revisão.
pub fn print_previews(previews: &[EmailPreview]) {
    let bold = Style::new().bold();
    for p in previews {
        println!("---");
        println!("{} {} <{}>", bold.apply_to("To:"), p.name, p.email);
        println!("{} {}", bold.apply_to("Subject:"), p.subject);
        println!("{} {}", bold.apply_to("Mode:"), mode_label(p.mode));
        for (i, q) in p.questions.iter().enumerate() {
            println!("  {}. {q}", i + 1);
        }
        println!();
        println!("{}", p.body);
    }
    println!("---");
}

fn mode_label(mode: DeliveryMode) -> &'static str {
    match mode {
        DeliveryMode::Mock => "mock (test inbox)",
        DeliveryMode::Real => "real (candidate inbox)",
    }
}

/// Imprime o resultado de um envio confirmado.
pub fn print_send_report(report: &SendReport) {
    println!("Mode: {}", mode_label(report.mode));
    for r in &report.outcome.results {
        println!("  ✉ {} {}", r.name, r.email.as_deref().unwrap_or("—"));
    }
    for pending in &report.scheduled {
        println!(
            "  ⏱ response for {} expected in {:.1}s",
            pending.applicant_id,
            pending.delay.as_secs_f64()
        );
    }
}

/// Imprime as respostas simuladas recebidas.
pub fn print_notifications(notifications: &[ResponseNotification]) {
    for n in notifications {
        println!(
            "  💬 {} replied: {} {}",
            n.name,
            Style::new().bold().apply_to(n.score),
            n.recommendation
        );
    }
}

/// Imprime um rascunho de resposta para revisão humana.
pub fn print_reply_draft(to: &str, draft: &ReplyDraft) {
    let bold = Style::new().bold();
    println!("{} {to}", bold.apply_to("AI-drafted reply to"));
    println!();
    println!("{}", draft.ai_drafted_reply);
}

/// Imprime os avisos transitórios acumulados pelo painel.
pub fn print_notices(notices: &[String]) {
    let yellow = Style::new().yellow();
    for notice in notices {
        println!("{} {notice}", yellow.apply_to("•"));
    }
}
