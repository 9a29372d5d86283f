// synthetic.rs - deterministic reference corpus generator
//
// Produces a mix of English-like prose paragraphs and CSV order tables, the
// two kinds of data a general-purpose compressor is usually judged on. The
// output depends only on `size` and `seed`.

static WORDS: &[&str] = &[
    "the", "of", "and", "to", "a", "in", "is", "that", "for", "it",
    "as", "was", "with", "be", "by", "on", "not", "he", "this", "are",
    "or", "his", "from", "at", "which", "but", "have", "an", "had", "they",
    "you", "were", "their", "one", "all", "we", "can", "her", "has", "there",
    "been", "if", "more", "when", "will", "would", "who", "so", "no", "she",
    "other", "its", "may", "these", "about", "than", "into", "them", "only", "some",
    "time", "could", "new", "two", "then", "do", "first", "any", "my", "now",
    "such", "like", "our", "over", "man", "me", "even", "most", "made", "after",
    "also", "did", "many", "before", "must", "through", "back", "years", "where", "much",
    "your", "way", "well", "down", "should", "because", "each", "just", "those", "people",
    "how", "too", "little", "state", "good", "very", "make", "world", "still", "own",
    "see", "men", "work", "long", "get", "here", "between", "both", "life", "being",
    "under", "never", "day", "same", "another", "know", "while", "last", "might", "us",
    "great", "old", "year", "off", "come", "since", "against", "go", "came", "right",
    "used", "take", "three", "small", "house", "water", "number", "system", "river", "market",
    "harbour", "engine", "morning", "letter", "country", "measure", "history", "window", "signal", "journey",
];

static CITIES: &[&str] = &[
    "Amsterdam", "Berlin", "Cairo", "Denver", "Edinburgh", "Florence", "Geneva", "Helsinki",
    "Istanbul", "Jakarta", "Kyoto", "Lisbon", "Madrid", "Nairobi", "Oslo", "Porto",
    "Quebec", "Reykjavik", "Seoul", "Toronto", "Utrecht", "Valencia", "Warsaw", "Zurich",
];

static PRODUCTS: &[&str] = &[
    "anchor bolt", "brass hinge", "cable tie", "drill bit", "end cap", "flat washer",
    "gasket", "hex nut", "insulation tape", "junction box", "key blank", "lock washer",
    "machine screw", "nylon spacer", "o-ring", "pipe clamp", "rivet", "spring pin",
    "threaded rod", "u-bolt", "v-belt", "wing nut",
];

pub const TABLE_HEADER: &str = "id,date,city,product,quantity,unit_price\n";

struct Rng(u32);

impl Rng {
    /// Uniform-ish value in `0..range`.
    #[inline]
    fn next(&mut self, range: u32) -> u32 {
        const PRIME1: u32 = 2_654_435_761;
        const PRIME2: u32 = 2_246_822_519;
        let mut r = self.0;
        r = r.wrapping_mul(PRIME1);
        r ^= PRIME2;
        r = r.rotate_left(13);
        self.0 = r;
        ((r as u64 * range as u64) >> 32) as u32
    }

    /// `lo..=hi`
    #[inline]
    fn between(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.next(hi - lo + 1)
    }

    /// Index skewed toward the front of a list of `len` items.
    #[inline]
    fn skewed(&mut self, len: usize) -> usize {
        let bound = self.next(len as u32) + 1;
        self.next(bound) as usize
    }
}

struct Generator {
    rng: Rng,
    out: Vec<u8>,
    next_id: u64,
}

impl Generator {
    fn paragraph(&mut self) {
        let sentences = self.rng.between(3, 8);
        for s in 0..sentences {
            if s > 0 {
                self.out.push(b' ');
            }
            self.sentence();
        }
        self.out.extend_from_slice(b"\n\n");
    }

    fn sentence(&mut self) {
        let words = self.rng.between(6, 18);
        for w in 0..words {
            let word = WORDS[self.rng.skewed(WORDS.len())].as_bytes();
            let at = self.out.len();
            self.out.extend_from_slice(word);
            if w == 0 {
                self.out[at] = self.out[at].to_ascii_uppercase();
            }
            if w + 1 < words {
                if self.rng.next(10) == 0 {
                    self.out.push(b',');
                }
                self.out.push(b' ');
            }
        }
        self.out.push(if self.rng.next(12) == 0 { b'?' } else { b'.' });
    }

    fn table(&mut self) {
        self.out.extend_from_slice(TABLE_HEADER.as_bytes());
        let rows = self.rng.between(20, 80);
        let month = self.rng.between(1, 12);
        for _ in 0..rows {
            let day = self.rng.between(1, 28);
            let city = CITIES[self.rng.skewed(CITIES.len())];
            let product = PRODUCTS[self.rng.next(PRODUCTS.len() as u32) as usize];
            let quantity = self.rng.between(1, 500);
            let cents = self.rng.between(5, 99_999);
            let line = format!(
                "{},2024-{:02}-{:02},{},{},{},{}.{:02}\n",
                self.next_id,
                month,
                day,
                city,
                product,
                quantity,
                cents / 100,
                cents % 100
            );
            self.out.extend_from_slice(line.as_bytes());
            self.next_id += 1;
        }
        self.out.push(b'\n');
    }
}

/// Generate exactly `size` bytes of reference data from `seed`.
pub fn generate(size: usize, seed: u32) -> Vec<u8> {
    let mut g = Generator {
        rng: Rng(seed),
        out: Vec::with_capacity(size + 4096),
        next_id: 1,
    };
    while g.out.len() < size {
        if g.rng.next(4) == 0 {
            g.table();
        } else {
            g.paragraph();
        }
    }
    g.out.truncate(size);
    g.out
}
