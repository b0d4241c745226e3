use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    relaychat::cli::main()
}
