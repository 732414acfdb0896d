use crate::demo::{
    run_demo, run_evaluate, run_questions_list, run_questions_show, DemoArgs, EvaluateArgs,
    QuestionsListArgs, QuestionsShowArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use interview_coach::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Interview Coach",
    about = "Score interview practice answers and run the practice API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Browse the question catalog
    Questions {
        #[command(subcommand)]
        command: QuestionsCommand,
    },
    /// Score a single answer against a catalog question
    Evaluate(EvaluateArgs),
    /// Score sample answers and print a practice session summary
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum QuestionsCommand {
    /// List questions, optionally filtered by category
    List(QuestionsListArgs),
    /// Print one question with its rubric
    Show(QuestionsShowArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questions {
            command: QuestionsCommand::List(args),
        } => run_questions_list(args),
        Command::Questions {
            command: QuestionsCommand::Show(args),
        } => run_questions_show(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}
