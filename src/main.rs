use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use quizcart::{LoadedQuiz, load_quiz, locate_package};

#[derive(Parser)]
#[command(name = "quizcart")]
#[command(version, about = "Inspect QTI quiz packages", long_about = None)]
struct Cli {
    /// Extraction root of an unpacked quiz package
    #[arg(value_name = "DIR")]
    root: PathBuf,

    /// Quiz-definition XML (located automatically when omitted)
    #[arg(long, value_name = "FILE")]
    quiz: Option<PathBuf>,

    /// Package manifest (located automatically when omitted)
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Print every question with its answers and attachments
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), quizcart::Error> {
    let (quiz_path, manifest_path) = if let Some(quiz) = &cli.quiz {
        (quiz.clone(), cli.manifest.clone())
    } else {
        let located = locate_package(&cli.root)?;
        (
            located.quiz_definition,
            cli.manifest.clone().or(located.manifest),
        )
    };

    let LoadedQuiz { quiz, diagnostics } = load_quiz(&quiz_path, manifest_path.as_deref(), &cli.root)?;

    println!("Title: {}", quiz.title);
    println!("Questions: {}", quiz.questions.len());
    println!("Total points: {}", quiz.total_points());

    if cli.verbose {
        for question in &quiz.questions {
            println!(
                "\n[{}] {} ({} pts)",
                question.question_type.as_tag(),
                question.question_id,
                question.points_possible
            );
            for answer in &question.answers {
                let mark = if answer.correct { "*" } else { " " };
                println!("  {mark} {}: {}", answer.answer_id, answer.text);
            }
            for attachment in &question.attachments {
                println!("  ({:?}) {}", attachment.kind, attachment.reference);
            }
        }
    }

    if !diagnostics.is_empty() {
        println!("\nDiagnostics ({}):", diagnostics.len());
        for entry in diagnostics.iter() {
            println!("  - {entry}");
        }
    }

    Ok(())
}
