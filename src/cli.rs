use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use storefront_checkout::catalog::{find_item, mock_catalog, MenuItem, Selection};
use storefront_checkout::checkout::{
    Acknowledgement, AmountHolder, CheckoutController, NoOpHook, PayloadBuilder, PaymentPayload,
    SessionSummary, SettlementMethod, SubMethod,
};
use storefront_checkout::config::{Config, MerchantConfig};
use storefront_checkout::error::{Error, Result};
use storefront_checkout::logger;

#[derive(Parser)]
#[command(name = "storefront-checkout")]
#[command(about = "Storefront checkout - bill amount, promotions and payment requests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: "human" or "json"
    #[arg(short, long)]
    pub format: Option<String>,

    /// Merchant config JSON file
    #[arg(short, long)]
    pub merchant_config: Option<String>,

    /// Log level filter (e.g. "debug")
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the demo menu
    Menu,

    /// List settlement methods offered for the merchant
    Methods,

    /// Open a checkout for selected items and apply edits in order
    Checkout {
        /// Catalog item ids to select
        #[arg(short, long, num_args = 1..)]
        select: Vec<u64>,

        /// Override the bill amount (typed text, unparsable means 0)
        #[arg(short, long)]
        amount: Option<String>,

        /// Settlement method
        #[arg(long, value_enum)]
        method: Option<MethodArg>,

        /// Bank program for the online promotion
        #[arg(long, value_enum)]
        bank: Option<BankArg>,

        /// Confirm the payment after edits
        #[arg(long)]
        confirm: bool,

        /// Seed for the random reduction
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Build a provider payment request
    Payload {
        #[arg(short, long, value_enum)]
        provider: ProviderArg,

        /// Raw amount text
        #[arg(short, long, default_value = "")]
        amount: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Cash,
    Online,
    ProviderA,
    ProviderB,
}

impl From<MethodArg> for SettlementMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Cash => SettlementMethod::Cash,
            MethodArg::Online => SettlementMethod::OnlinePromotion,
            MethodArg::ProviderA => SettlementMethod::ProviderA,
            MethodArg::ProviderB => SettlementMethod::ProviderB,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BankArg {
    X,
    Y,
}

impl From<BankArg> for SubMethod {
    fn from(arg: BankArg) -> Self {
        match arg {
            BankArg::X => SubMethod::BankX,
            BankArg::Y => SubMethod::BankY,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProviderArg {
    A,
    B,
}

/// Format output based on format type
fn format_output<T: serde::Serialize + std::fmt::Debug>(data: &T, format: &str) -> Result<String> {
    match format {
        "json" => serde_json::to_string_pretty(data)
            .map_err(|e| Error::Output(format!("Failed to serialize JSON: {}", e))),
        _ => Ok(format!("{:#?}", data)),
    }
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(path) = &cli.merchant_config {
        config.set_merchant(MerchantConfig::load(std::path::Path::new(path))?);
    }
    if let Some(format) = &cli.format {
        config.set_output_format(format.clone());
    }
    if let Some(level) = &cli.log_level {
        config.set_log_level(level.clone());
    }
    Ok(config)
}

fn select_items(catalog: &[MenuItem], ids: &[u64]) -> Result<Selection> {
    let mut selection = Selection::new();
    for &id in ids {
        if find_item(catalog, id).is_none() {
            return Err(Error::InvalidSelection(format!("No menu item with id {}", id)));
        }
        selection.select(id);
    }
    Ok(selection)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    logger::init(config.get_log_level());
    let format = config.get_output_format().to_string();
    let merchant = config.get_merchant().clone();

    match cli.command {
        Commands::Menu => {
            let output = MenuOutput {
                store: merchant.store_name.clone(),
                currency_symbol: merchant.currency_symbol.clone(),
                items: mock_catalog(),
            };
            println!("{}", format_output(&output, &format)?);
            Ok(())
        }

        Commands::Methods => {
            let controller = CheckoutController::new(merchant);
            let methods = controller.available_methods();
            if !controller.merchant().has_any_provider() && format != "json" {
                println!("No payment link configured, proceed to counter");
            }
            println!("{}", format_output(&methods, &format)?);
            Ok(())
        }

        Commands::Checkout {
            select,
            amount,
            method,
            bank,
            confirm,
            seed,
        } => {
            let catalog = mock_catalog();
            let selection = select_items(&catalog, &select)?;
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let currency = merchant.currency_symbol.clone();
            let mut controller = CheckoutController::with_parts(
                merchant,
                PayloadBuilder::with_endpoint(config.get_qr_endpoint()),
                NoOpHook,
                rng,
            );

            controller.open(selection.subtotal(&catalog));
            if let Some(text) = amount.as_deref() {
                controller.edit_amount(text);
            }
            if let Some(method) = method {
                let method = SettlementMethod::from(method);
                if !controller.select_method(method) {
                    return Err(Error::InvalidInput(format!(
                        "Settlement method {} is not configured",
                        method.label()
                    )));
                }
            }
            if let Some(bank) = bank {
                controller.select_sub_method(bank.into());
            }

            let summary = match controller.session() {
                Some(session) => session.summary(&currency),
                None => return Err(Error::InvalidInput("Checkout is not open".to_string())),
            };
            let acknowledgement = if confirm { controller.confirm() } else { None };
            let output = CheckoutOutput {
                summary,
                payload: controller.payload(),
                acknowledgement: acknowledgement.as_ref().map(Acknowledgement::message),
            };
            controller.close();

            println!("{}", format_output(&output, &format)?);
            Ok(())
        }

        Commands::Payload { provider, amount } => {
            let (method, merchant_id) = match provider {
                ProviderArg::A => (SettlementMethod::ProviderA, merchant.provider_a()),
                ProviderArg::B => (SettlementMethod::ProviderB, merchant.provider_b()),
            };
            let merchant_id = merchant_id.ok_or_else(|| {
                Error::InvalidInput(format!("Settlement method {} is not configured", method.label()))
            })?;
            let provider = method.provider().ok_or_else(|| {
                Error::InvalidInput(format!("{} has no provider", method.label()))
            })?;
            let mut holder = AmountHolder::default();
            holder.set_text(&amount);
            let payload = PayloadBuilder::with_endpoint(config.get_qr_endpoint())
                .build(provider, merchant_id, &holder.request_text());
            println!("{}", format_output(&payload, &format)?);
            Ok(())
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct MenuOutput {
    store: String,
    currency_symbol: String,
    items: Vec<MenuItem>,
}

#[derive(Debug, serde::Serialize)]
struct CheckoutOutput {
    summary: SessionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<PaymentPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    acknowledgement: Option<String>,
}
