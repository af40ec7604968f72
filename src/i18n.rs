//! Localized text shown around and on top of the canvas.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Es,
    De,
    Tr,
}

impl Lang {
    /// Picks a language from a POSIX locale string such as `de_DE.UTF-8`.
    /// Anything unknown falls back to English.
    pub fn from_locale(locale: &str) -> Self {
        let code = locale
            .split(['_', '.', '-', '@'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match code.as_str() {
            "es" => Lang::Es,
            "de" => Lang::De,
            "tr" => Lang::Tr,
            _ => Lang::En,
        }
    }
}

pub struct Strings {
    pub score: &'static str,
    pub best: &'static str,
    pub title: &'static str,
    pub start_hint: &'static str,
    pub game_over: &'static str,
    pub again_hint: &'static str,
    pub new_record: &'static str,
    /// Game-over remarks, from a crash at zero up to a long run.
    pub remarks: [&'static str; 4],
}

static EN: Strings = Strings {
    score: "Score",
    best: "Best",
    title: "SKYFLAP",
    start_hint: "Space / click to fly",
    game_over: "GAME OVER",
    again_hint: "Space or R to play again",
    new_record: "New record!",
    remarks: ["Ouch! Try again", "Not bad", "Great flying!", "Legendary!"],
};

static ES: Strings = Strings {
    score: "Puntos",
    best: "Récord",
    title: "SKYFLAP",
    start_hint: "Espacio / clic para volar",
    game_over: "FIN DEL JUEGO",
    again_hint: "Espacio o R para jugar otra vez",
    new_record: "¡Nuevo récord!",
    remarks: [
        "¡Ay! Inténtalo de nuevo",
        "Nada mal",
        "¡Gran vuelo!",
        "¡Legendario!",
    ],
};

static DE: Strings = Strings {
    score: "Punkte",
    best: "Rekord",
    title: "SKYFLAP",
    start_hint: "Leertaste / Klick zum Fliegen",
    game_over: "SPIEL VORBEI",
    again_hint: "Leertaste oder R für neue Runde",
    new_record: "Neuer Rekord!",
    remarks: [
        "Autsch! Nochmal",
        "Nicht schlecht",
        "Toller Flug!",
        "Legendär!",
    ],
};

static TR: Strings = Strings {
    score: "Skor",
    best: "En İyi",
    title: "WARP FLAPPY BIRD",
    start_hint: "Boşluk tuşu ile kuşu uçur",
    game_over: "Game Over",
    again_hint: "R ile yeniden başla",
    new_record: "Yeni rekor!",
    remarks: ["Ah! Tekrar dene", "Fena değil", "Harika uçuş!", "Efsane!"],
};

impl Strings {
    pub fn for_lang(lang: Lang) -> &'static Strings {
        match lang {
            Lang::En => &EN,
            Lang::Es => &ES,
            Lang::De => &DE,
            Lang::Tr => &TR,
        }
    }

    pub fn remark(&self, score: u32) -> &'static str {
        match score {
            0 => self.remarks[0],
            1..=4 => self.remarks[1],
            5..=14 => self.remarks[2],
            _ => self.remarks[3],
        }
    }
}
