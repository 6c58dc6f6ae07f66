use colored::Colorize;

pub mod audit;
pub mod display;
pub mod report;

pub const BANNER: &str = r#"
   ███████╗██╗████████╗███████╗██╗     ███████╗███╗   ██╗███████╗
   ██╔════╝██║╚══██╔══╝██╔════╝██║     ██╔════╝████╗  ██║██╔════╝
   ███████╗██║   ██║   █████╗  ██║     █████╗  ██╔██╗ ██║███████╗
   ╚════██║██║   ██║   ██╔══╝  ██║     ██╔══╝  ██║╚██╗██║╚════██║
   ███████║██║   ██║   ███████╗███████╗███████╗██║ ╚████║███████║
   ╚══════╝╚═╝   ╚═╝   ╚══════╝╚══════╝╚══════╝╚═╝  ╚═══╝╚══════╝
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_blue().bold());
    println!(
        "   {} {}\n",
        "Performance · Security · SEO · Accessibility".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
