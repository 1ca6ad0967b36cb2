/// Terminal output helpers using the `colored` crate.
pub mod ui {
    use colored::Colorize;

    /// Echo a command line before it runs
    pub fn command(line: &str) {
        println!("{} {}", "$".dimmed(), line);
    }

    /// Print a section header (bold)
    pub fn section(title: &str) {
        println!("{}", title.bold());
    }

    /// Print a success message (green bold), preceded by a blank line
    pub fn success(msg: &str) {
        println!("\n{}", msg.green().bold());
    }

    /// Print a notice on stderr (yellow)
    pub fn notice(msg: &str) {
        eprintln!("  {} {}", "note".yellow(), msg);
    }
}
