//! Terminal output.

use abode::FormOptions;
use abode::model::EvaluationMetrics;

pub(crate) fn print_banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

pub(crate) fn print_metrics(metrics: &EvaluationMetrics) {
    println!("{:<12} {:>12} {:>12}", "", "MSE", "R²");
    println!("{}", "─".repeat(38));
    println!(
        "{:<12} {:>12.4} {:>12.4}",
        "Train", metrics.train_mse, metrics.train_r2
    );
    println!(
        "{:<12} {:>12.4} {:>12.4}",
        "Test", metrics.test_mse, metrics.test_r2
    );
    println!("\n(log-price space)");
}

fn print_list(name: &str, values: &[String]) {
    println!("{name} ({}):", values.len());
    for value in values {
        println!("  {value}");
    }
    println!();
}

pub(crate) fn print_options(options: &FormOptions) {
    print_list("Property types", &options.property_types);
    print_list("Compounds", &options.compounds);
    print_list("Cities", &options.cities);
    print_list("Delivery terms", &options.delivery_terms);
    print_list("Payment options", &options.payment_options);

    println!("Cities by compound:");
    for (compound, cities) in &options.compound_cities {
        println!("  {compound}: {}", cities.join(", "));
    }
}

/// Price with thousands separators and two decimals.
pub(crate) fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as u128;
    let (whole, frac) = (cents / 100, cents % 100);
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped}.{frac:02}")
}
