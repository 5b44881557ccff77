use ethers::prelude::Abigen;
use std::{env, path::Path};

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();

    // gen types for the lottery contract

    let abi_source = "./abi/Lottery.json";
    println!("cargo:rerun-if-changed={abi_source}");

    let out_file = Path::new(&out_dir).join("lottery_contract.rs");
    if out_file.exists() {
        std::fs::remove_file(&out_file).unwrap();
    }

    Abigen::new("Lottery", abi_source)
        .unwrap()
        .generate()
        .unwrap()
        .write_to_file(out_file)
        .unwrap();
}
