use anyhow::Result;
use clap::Parser;
use log::debug;
use std::io::{self, Write};
use zeroize::Zeroizing;

use evm_wallet_manager::host::TerminalHost;
use evm_wallet_manager::shell::{self, write_credential};
use evm_wallet_manager::{Args, Command, Credential, Session, WalletCore};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = Args::parse();
    let core = WalletCore::new(args.wallet_config());
    debug!("Derivation path: {}", core.config().derivation_path());

    match args.command.take().unwrap_or(Command::Shell) {
        Command::New => {
            let credential = core.generate()?;
            print_credential(&credential, args.json)?;
        }
        Command::ImportKey { key } => {
            let key = match key {
                Some(k) => Zeroizing::new(k),
                None => prompt("Enter your private key:")?,
            };
            let credential = core.import_from_private_key(&key)?;
            print_credential(&credential, args.json)?;
        }
        Command::ImportMnemonic { mnemonic } => {
            let mnemonic = match mnemonic {
                Some(m) => Zeroizing::new(m),
                None => prompt("Enter your mnemonic phrase:")?,
            };
            let credential = core.import_from_mnemonic(&mnemonic)?;
            print_credential(&credential, args.json)?;
        }
        Command::Shell => {
            let mut session = Session::new(core, TerminalHost::stdout());
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell::run(&mut session, stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}

fn prompt(message: &str) -> Result<Zeroizing<String>> {
    println!("{}", message);
    let mut input = Zeroizing::new(String::new());
    io::stdin().read_line(&mut input)?;
    Ok(Zeroizing::new(input.trim().to_string()))
}

fn print_credential(credential: &Credential, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, credential)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout)?;
        write_credential(credential, &mut stdout)?;
    }
    Ok(())
}
