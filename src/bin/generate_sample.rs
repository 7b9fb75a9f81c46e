use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const N_TITLES: usize = 600;

const COUNTRIES: [&str; 9] = [
    "United States",
    "India",
    "United Kingdom",
    "Japan",
    "South Korea",
    "Spain",
    "France",
    "United States, Canada",
    "Nigeria",
];

const GENRES: [&str; 12] = [
    "Dramas",
    "Comedies",
    "International Movies",
    "Documentaries",
    "Action & Adventure",
    "Thrillers",
    "Romantic Movies",
    "International TV Shows",
    "TV Dramas",
    "Korean TV Shows",
    "Crime TV Shows",
    "Kids' TV",
];

const RATINGS: [&str; 7] = ["TV-MA", "TV-14", "R", "PG-13", "TV-PG", "PG", "TV-Y7"];

const DIRECTORS: [&str; 8] = [
    "Rajiv Chilaka",
    "Raúl Campos",
    "Marcus Raboy",
    "Suhas Kadav",
    "Jay Karas",
    "Cathy Garcia-Molina",
    "Martin Scorsese",
    "Youssef Chahine",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// One synthetic catalog row; `None` cells are written empty / null.
struct Row {
    show_id: String,
    kind: &'static str,
    title: String,
    director: Option<&'static str>,
    country: Option<&'static str>,
    date_added: Option<String>,
    release_year: i64,
    rating: Option<&'static str>,
    duration: String,
    listed_in: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    (0..N_TITLES)
        .map(|i| {
            let is_movie = rng.chance(70);
            let release_year = 1990 + rng.below(32) as i64;

            let n_genres = 1 + rng.below(3);
            let mut genres: Vec<&str> = Vec::new();
            while genres.len() < n_genres {
                let g = rng.pick(&GENRES);
                if !genres.contains(&g) {
                    genres.push(g);
                }
            }

            let duration = if is_movie {
                format!("{} min", 60 + rng.below(100))
            } else {
                let seasons = 1 + rng.below(5);
                if seasons == 1 {
                    "1 Season".to_string()
                } else {
                    format!("{seasons} Seasons")
                }
            };

            // A few deliberately bad dates exercise the unparsed path.
            let date_added = if rng.chance(3) {
                Some("unknown".to_string())
            } else if rng.chance(2) {
                None
            } else {
                let year = (release_year.max(2008) + rng.below(4) as i64).min(2021);
                Some(format!(
                    "{} {}, {year}",
                    MONTHS[rng.below(12)],
                    1 + rng.below(28)
                ))
            };

            Row {
                show_id: format!("s{}", i + 1),
                kind: if is_movie { "Movie" } else { "TV Show" },
                title: format!("Sample Title {}", i + 1),
                director: (is_movie && rng.chance(80)).then(|| rng.pick(&DIRECTORS)),
                country: rng.chance(90).then(|| rng.pick(&COUNTRIES)),
                date_added,
                release_year,
                rating: rng.chance(98).then(|| rng.pick(&RATINGS)),
                duration,
                listed_in: genres.join(", "),
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "show_id",
        "type",
        "title",
        "director",
        "country",
        "date_added",
        "release_year",
        "rating",
        "duration",
        "listed_in",
    ])?;
    for r in rows {
        let year = r.release_year.to_string();
        writer.write_record([
            r.show_id.as_str(),
            r.kind,
            r.title.as_str(),
            r.director.unwrap_or(""),
            r.country.unwrap_or(""),
            r.date_added.as_deref().unwrap_or(""),
            year.as_str(),
            r.rating.unwrap_or(""),
            r.duration.as_str(),
            r.listed_in.as_str(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let text = |f: &dyn Fn(&Row) -> Option<String>| -> ArrayRef {
        Arc::new(rows.iter().map(f).collect::<StringArray>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("show_id", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, true),
        Field::new("title", DataType::Utf8, true),
        Field::new("director", DataType::Utf8, true),
        Field::new("country", DataType::Utf8, true),
        Field::new("date_added", DataType::Utf8, true),
        Field::new("release_year", DataType::Int64, false),
        Field::new("rating", DataType::Utf8, true),
        Field::new("duration", DataType::Utf8, true),
        Field::new("listed_in", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(&|r: &Row| Some(r.show_id.clone())),
            text(&|r: &Row| Some(r.kind.to_string())),
            text(&|r: &Row| Some(r.title.clone())),
            text(&|r: &Row| r.director.map(str::to_string)),
            text(&|r: &Row| r.country.map(str::to_string)),
            text(&|r: &Row| r.date_added.clone()),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.release_year))),
            text(&|r: &Row| r.rating.map(str::to_string)),
            text(&|r: &Row| Some(r.duration.clone())),
            text(&|r: &Row| Some(r.listed_in.clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_catalog.csv")?;
    write_parquet(&rows, "sample_catalog.parquet")?;

    println!(
        "Wrote {} titles to sample_catalog.csv and sample_catalog.parquet",
        rows.len()
    );
    Ok(())
}
