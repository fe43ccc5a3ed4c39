use crate::server;
use clap::{Args, Parser, Subcommand};
use underwriting::error::AppError;
use underwriting::loans::{decide_application, LoanApplication, Occupancy};

#[derive(Parser, Debug)]
#[command(
    name = "Mortgage Underwriting",
    about = "Run the mortgage underwriting service or decide a single application",
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
    /// Decide one application from the command line without recording it
    Evaluate(EvaluateArgs),
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

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Borrower name shown in the output
    #[arg(long, default_value = "Applicant")]
    pub(crate) name: String,
    /// Gross monthly income
    #[arg(long)]
    pub(crate) monthly_income: f64,
    /// Total monthly debt obligations
    #[arg(long)]
    pub(crate) monthly_debts: f64,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) loan_amount: f64,
    /// Appraised property value
    #[arg(long)]
    pub(crate) property_value: f64,
    /// Borrower credit score
    #[arg(long)]
    pub(crate) credit_score: i32,
    /// primary, secondary, or investment
    #[arg(long, default_value = "primary")]
    pub(crate) occupancy: String,
}

impl From<EvaluateArgs> for LoanApplication {
    fn from(args: EvaluateArgs) -> Self {
        LoanApplication {
            borrower_name: args.name,
            monthly_income: args.monthly_income,
            monthly_debts: args.monthly_debts,
            loan_amount: args.loan_amount,
            property_value: args.property_value,
            credit_score: args.credit_score,
            occupancy: Occupancy::from(args.occupancy),
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let application = LoanApplication::from(args);
    let response = decide_application(&application)?;

    println!("Underwriting decision for {}", application.borrower_name);
    println!("- Occupancy: {}", application.occupancy);
    println!(
        "- DTI {:.2}% | LTV {:.2}%",
        response.dti * 100.0,
        response.ltv * 100.0
    );
    println!("- Decision: {}", response.decision);
    println!("- Reason: {}", response.reason);
    if let Some(rule) = response.rule {
        println!("- Rule: {}", rule.id());
    }

    Ok(())
}
