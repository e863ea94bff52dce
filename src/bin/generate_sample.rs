//! Write a synthetic `salary_data.csv` for trying the viewer.
//!
//! Usage: `generate_sample [PATH] [ROWS]`

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const HEADER: [&str; 11] = [
    "work_year",
    "experience_level",
    "employment_type",
    "job_title",
    "salary",
    "salary_currency",
    "salary_in_usd",
    "employee_residence",
    "remote_ratio",
    "company_location",
    "company_size",
];

/// Later years get more rows, like the real survey data.
const YEARS: [(i32, f64); 4] = [(2020, 0.1), (2021, 0.2), (2022, 0.3), (2023, 0.4)];

/// Title and median USD salary.
const TITLES: [(&str, f64); 6] = [
    ("Data Scientist", 125_000.0),
    ("Data Engineer", 135_000.0),
    ("Data Analyst", 95_000.0),
    ("Machine Learning Engineer", 150_000.0),
    ("Research Scientist", 160_000.0),
    ("Analytics Engineer", 120_000.0),
];

/// Experience level and salary multiplier.
const LEVELS: [(&str, f64); 4] = [("EN", 0.6), ("MI", 0.85), ("SE", 1.1), ("EX", 1.5)];

/// Currency, USD per unit, residence / company country.
const CURRENCIES: [(&str, f64, &str); 4] = [
    ("USD", 1.0, "US"),
    ("EUR", 1.08, "DE"),
    ("GBP", 1.25, "GB"),
    ("INR", 0.012, "IN"),
];

const EMPLOYMENT: [&str; 4] = ["FT", "FT", "PT", "CT"];
const REMOTE: [u8; 3] = [0, 50, 100];
const SIZES: [&str; 3] = ["S", "M", "L"];

fn pick_year(rng: &mut SimpleRng) -> i32 {
    let mut u = rng.next_f64();
    for (year, weight) in YEARS {
        if u < weight {
            return year;
        }
        u -= weight;
    }
    YEARS[YEARS.len() - 1].0
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "salary_data.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 600,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER).context("writing header")?;

    for _ in 0..rows {
        let year = pick_year(&mut rng);
        let &(title, median) = rng.pick(&TITLES);
        let &(level, level_factor) = rng.pick(&LEVELS);
        let &(currency, usd_rate, country) = rng.pick(&CURRENCIES);

        // Salaries drift upwards ~5% a year.
        let drift = 1.05f64.powi(year - 2020);
        let usd = (median * level_factor * drift * rng.gauss(1.0, 0.2).max(0.3)).round();
        let local = (usd / usd_rate).round();

        writer
            .write_record([
                year.to_string(),
                level.to_string(),
                rng.pick(&EMPLOYMENT).to_string(),
                title.to_string(),
                local.to_string(),
                currency.to_string(),
                usd.to_string(),
                country.to_string(),
                rng.pick(&REMOTE).to_string(),
                country.to_string(),
                rng.pick(&SIZES).to_string(),
            ])
            .context("writing row")?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} salary records to {output_path}");
    Ok(())
}
