use std::fmt::Write as _;

use ansi_term::Color::{White, Yellow};
use structopt::StructOpt;

use polyscale::{Ledger, Store};
use polyscale_config::Config;
use polyscale_data_structures::{Address, ModelEntry, Tokens};
use polyscale_util::timestamp::pretty_print;

pub fn exec_cmd(command: Command, config: Config) -> Result<(), failure::Error> {
    // Dumping the config must work even when the configured store cannot be opened
    if let Command::ShowConfig = command {
        print!("{}", toml::to_string(&config)?);
        return Ok(());
    }

    // `store` holds the snapshot lock until this function returns, after the flush
    let store = Store::open(&config.storage)?;
    let ledger = Ledger::restore(store.storage(), &config)?;

    let output = run(command, &ledger, &config)?;
    if output.changed {
        ledger.persist(store.storage())?;
        store.flush()?;
    }
    print!("{}", output.text);

    Ok(())
}

struct Output {
    text: String,
    changed: bool,
}

impl Output {
    fn read(text: String) -> Self {
        Self {
            text,
            changed: false,
        }
    }

    fn write(text: String) -> Self {
        Self {
            text,
            changed: true,
        }
    }
}

fn run(command: Command, ledger: &Ledger, config: &Config) -> Result<Output, failure::Error> {
    let amount_str = |amount: Tokens| {
        format!(
            "{} ({} {})",
            amount,
            amount.format_units(config.token.decimals),
            config.token.symbol
        )
    };

    let output = match command {
        Command::RegisterModel {
            from,
            round,
            cid,
            metadata,
        } => {
            let entry = ledger.registry.register_model(&from, round, &cid, &metadata)?;
            Output::write(format!(
                "Registered model #{}\n",
                Yellow.bold().paint(entry.id.to_string())
            ))
        }
        Command::Models { round } => {
            let models = match round {
                Some(round) => ledger.registry.models_in_round(round),
                None => ledger.registry.get_models(),
            };
            let mut text = String::new();
            for entry in &models {
                write_model(&mut text, entry)?;
            }
            if models.is_empty() {
                text.push_str("No models registered\n");
            }
            Output::read(text)
        }
        Command::TotalModels => Output::read(format!("{}\n", ledger.registry.total_models())),
        Command::Mint { from, to, amount } => {
            let balance = ledger.token.mint(&from, &to, Tokens::from(amount))?;
            Output::write(format!("Balance of {}: {}\n", to, amount_str(balance)))
        }
        Command::Reward { from, to, amount } => {
            let balance = ledger.token.reward(&from, &to, Tokens::from(amount))?;
            Output::write(format!("Balance of {}: {}\n", to, amount_str(balance)))
        }
        Command::Burn {
            from,
            account,
            amount,
        } => {
            let balance = ledger.token.burn(&from, &account, Tokens::from(amount))?;
            Output::write(format!("Balance of {}: {}\n", account, amount_str(balance)))
        }
        Command::Balance { account } => Output::read(format!(
            "Balance of {}: {}\n",
            account,
            amount_str(ledger.token.balance_of(&account))
        )),
        Command::Supply => Output::read(format!(
            "Total supply: {}\n",
            amount_str(ledger.token.total_supply())
        )),
        Command::AddReputation { from, who, amount } => {
            let score = ledger.reputation.add_reputation(&from, &who, amount)?;
            Output::write(format!("Reputation of {}: {}\n", who, score))
        }
        Command::ReduceReputation { from, who, amount } => {
            let score = ledger.reputation.reduce_reputation(&from, &who, amount)?;
            Output::write(format!("Reputation of {}: {}\n", who, score))
        }
        Command::Reputation { who } => Output::read(format!(
            "Reputation of {}: {}\n",
            who,
            ledger.reputation.get_reputation(&who)
        )),
        Command::ShowConfig => Output::read(toml::to_string(config)?),
    };

    Ok(output)
}

fn write_model(text: &mut String, entry: &ModelEntry<Address>) -> std::fmt::Result {
    writeln!(
        text,
        "{} round {} cid {}",
        White.bold().paint(format!("#{}", entry.id)),
        entry.round,
        entry.content_id
    )?;
    writeln!(text, "    submitter: {}", entry.submitter)?;
    writeln!(text, "    registered: {}", pretty_print(entry.timestamp))?;
    match entry.metrics() {
        Some(metrics) => writeln!(text, "    metrics: {}", serde_json::Value::Object(metrics))?,
        None if !entry.metadata.is_empty() => writeln!(text, "    metadata: {}", entry.metadata)?,
        None => {}
    }

    Ok(())
}

#[derive(Debug, StructOpt)]
pub enum Command {
    #[structopt(name = "register-model", about = "Append a model to the registry")]
    RegisterModel {
        /// Address of the submitter.
        #[structopt(long = "from")]
        from: Address,
        /// Training round the model belongs to.
        #[structopt(long = "round")]
        round: u64,
        /// Content identifier of the model artifact.
        #[structopt(long = "cid")]
        cid: String,
        /// Free-form metadata, usually a JSON object with the model metrics.
        #[structopt(long = "metadata", default_value = "")]
        metadata: String,
    },
    #[structopt(name = "models", about = "List the registered models")]
    Models {
        /// Only list the models of this round.
        #[structopt(long = "round")]
        round: Option<u64>,
    },
    #[structopt(name = "total-models", about = "Number of registered models")]
    TotalModels,
    #[structopt(name = "mint", about = "Create new tokens")]
    Mint {
        /// Address of the caller.
        #[structopt(long = "from")]
        from: Address,
        /// Account receiving the tokens.
        #[structopt(long = "to")]
        to: Address,
        /// Amount, in base units.
        #[structopt(long = "amount")]
        amount: u64,
    },
    #[structopt(name = "reward", about = "Reward a contributor with new tokens")]
    Reward {
        /// Address of the caller.
        #[structopt(long = "from")]
        from: Address,
        /// Account receiving the tokens.
        #[structopt(long = "to")]
        to: Address,
        /// Amount, in base units.
        #[structopt(long = "amount")]
        amount: u64,
    },
    #[structopt(name = "burn", about = "Destroy tokens from an account")]
    Burn {
        /// Address of the caller.
        #[structopt(long = "from")]
        from: Address,
        /// Account losing the tokens.
        #[structopt(long = "account")]
        account: Address,
        /// Amount, in base units.
        #[structopt(long = "amount")]
        amount: u64,
    },
    #[structopt(name = "balance", about = "Token balance of an account")]
    Balance {
        #[structopt(long = "account")]
        account: Address,
    },
    #[structopt(name = "supply", about = "Total token supply")]
    Supply,
    #[structopt(name = "add-reputation", about = "Increase the reputation of a participant")]
    AddReputation {
        /// Address of the caller.
        #[structopt(long = "from")]
        from: Address,
        /// Participant whose reputation changes.
        #[structopt(long = "who")]
        who: Address,
        #[structopt(long = "amount")]
        amount: u64,
    },
    #[structopt(
        name = "reduce-reputation",
        about = "Decrease the reputation of a participant, stopping at zero"
    )]
    ReduceReputation {
        /// Address of the caller.
        #[structopt(long = "from")]
        from: Address,
        /// Participant whose reputation changes.
        #[structopt(long = "who")]
        who: Address,
        #[structopt(long = "amount")]
        amount: u64,
    },
    #[structopt(name = "reputation", about = "Reputation score of a participant")]
    Reputation {
        #[structopt(long = "who")]
        who: Address,
    },
    #[structopt(name = "show-config", about = "Dump the loaded config in Toml format")]
    ShowConfig,
}
