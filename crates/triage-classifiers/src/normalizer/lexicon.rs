//! Built-in Russian helpdesk lexicon
//!
//! Forms are generated from inflection paradigms over the vocabulary that
//! shows up in service-desk tickets, plus a table of irregular forms.

use triage_core::{Error, Result};

use super::morphology::LexiconBuilder;

/// Inflection class of a lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paradigm {
    /// сервер, принтер
    NounMascHard,
    /// запуск, ноутбук (и after velars)
    NounMascVelar,
    /// пароль, кабель
    NounMascSoft,
    /// сбой
    NounMascJ,
    /// почта, база
    NounFemA,
    /// ошибка, задача
    NounFemAVelar,
    /// бухгалтерия, лицензия
    NounFemIya,
    /// сеть, помощь
    NounFemSoft,
    /// подключение
    NounNeutIe,
    /// письмо, окно
    NounNeutO,
    /// недоступный
    AdjHard,
    /// технический
    AdjVelar,
    /// работать
    VerbAt,
    /// проверять
    VerbYat,
    /// установить
    VerbIt,
    /// включить (у/ат after sibilants)
    VerbItSibilant,
    /// видеть
    VerbEt,
    /// при, срочно
    Invariable,
}

impl Paradigm {
    fn lemma_suffix(&self) -> &'static str {
        match self {
            Self::NounMascHard | Self::NounMascVelar | Self::Invariable => "",
            Self::NounMascSoft | Self::NounFemSoft => "ь",
            Self::NounMascJ => "й",
            Self::NounFemA | Self::NounFemAVelar => "а",
            Self::NounFemIya => "ия",
            Self::NounNeutIe => "ие",
            Self::NounNeutO => "о",
            Self::AdjHard => "ый",
            Self::AdjVelar => "ий",
            Self::VerbAt => "ать",
            Self::VerbYat => "ять",
            Self::VerbIt | Self::VerbItSibilant => "ить",
            Self::VerbEt => "еть",
        }
    }

    /// Endings appended to the stem; for verbs, the finite forms only
    fn endings(&self) -> &'static [&'static str] {
        match self {
            Self::NounMascHard => &["", "а", "у", "ом", "е", "ы", "ов", "ам", "ами", "ах"],
            Self::NounMascVelar => &["", "а", "у", "ом", "е", "и", "ов", "ам", "ами", "ах"],
            Self::NounMascSoft => &["ь", "я", "ю", "ем", "е", "и", "ей", "ям", "ями", "ях"],
            Self::NounMascJ => &["й", "я", "ю", "ем", "е", "и", "ев", "ям", "ями", "ях"],
            Self::NounFemA => &["а", "ы", "е", "у", "ой", "ою", "", "ам", "ами", "ах"],
            Self::NounFemAVelar => &["а", "и", "е", "у", "ой", "ою", "ам", "ами", "ах"],
            Self::NounFemIya => &["ия", "ии", "ию", "ией", "ий", "иям", "иями", "иях"],
            Self::NounFemSoft => &["ь", "и", "ью", "ей", "ям", "ями", "ях"],
            Self::NounNeutIe => &["ие", "ия", "ию", "ием", "ии", "ий", "иям", "иями", "иях"],
            Self::NounNeutO => &["о", "а", "у", "ом", "е", "ам", "ами", "ах"],
            Self::AdjHard => &[
                "ый", "ая", "ое", "ые", "ого", "ому", "ым", "ом", "ой", "ую", "ых", "ыми", "а", "о", "ы",
            ],
            Self::AdjVelar => &[
                "ий", "ая", "ое", "ие", "ого", "ому", "им", "ом", "ой", "ую", "их", "ими",
            ],
            Self::VerbAt => &[
                "ать", "аю", "аешь", "ает", "аем", "аете", "ают", "ал", "ала", "ало", "али", "ай",
                "айте", "ая",
            ],
            Self::VerbYat => &[
                "ять", "яю", "яешь", "яет", "яем", "яете", "яют", "ял", "яла", "яло", "яли", "яй",
                "яйте", "яя",
            ],
            Self::VerbIt => &[
                "ить", "ю", "ишь", "ит", "им", "ите", "ят", "ил", "ила", "ило", "или", "и",
            ],
            Self::VerbItSibilant => &[
                "ить", "у", "ишь", "ит", "им", "ите", "ат", "ил", "ила", "ило", "или", "и",
            ],
            Self::VerbEt => &[
                "еть", "ю", "ишь", "ит", "им", "ите", "ят", "ел", "ела", "ело", "ели",
            ],
            Self::Invariable => &[""],
        }
    }

    /// Participle endings, generated for non-reflexive verbs only
    fn participle_endings(&self) -> &'static [&'static str] {
        match self {
            Self::VerbAt => &["ающий", "ающая", "ающее", "ающие", "ающего", "ающих", "авший"],
            Self::VerbYat => &["яющий", "яющая", "яющее", "яющие", "яющего", "яющих", "явший"],
            Self::VerbIt | Self::VerbItSibilant => &["ивший", "ившая", "ившие"],
            Self::VerbEt => &["евший"],
            _ => &[],
        }
    }

    fn is_verb(&self) -> bool {
        matches!(
            self,
            Self::VerbAt | Self::VerbYat | Self::VerbIt | Self::VerbItSibilant | Self::VerbEt
        )
    }
}

/// Generate all forms of `lemma` under `paradigm`.
///
/// Verb lemmas ending in "ся" are conjugated as reflexives: the particle is
/// re-attached as "сь" after a vowel and "ся" after a consonant.
pub fn inflect(lemma: &str, paradigm: Paradigm) -> Result<Vec<String>> {
    let (base, reflexive) = match lemma.strip_suffix("ся") {
        Some(base) if paradigm.is_verb() => (base, true),
        _ => (lemma, false),
    };

    let stem = base.strip_suffix(paradigm.lemma_suffix()).ok_or_else(|| {
        Error::lexicon(format!(
            "lemma '{}' does not end with '{}' required by {:?}",
            lemma,
            paradigm.lemma_suffix(),
            paradigm
        ))
    })?;

    let mut forms: Vec<String> = paradigm
        .endings()
        .iter()
        .map(|ending| format!("{}{}", stem, ending))
        .collect();

    if reflexive {
        forms = forms
            .into_iter()
            .map(|form| {
                let particle = match form.chars().last() {
                    Some(c) if "аеёиоуыэюя".contains(c) => "сь",
                    _ => "ся",
                };
                format!("{}{}", form, particle)
            })
            .collect();
    } else {
        forms.extend(
            paradigm
                .participle_endings()
                .iter()
                .map(|ending| format!("{}{}", stem, ending)),
        );
    }

    Ok(forms)
}

const VOCABULARY: &[(Paradigm, &[&str])] = &[
    (
        Paradigm::NounMascHard,
        &[
            "сервер", "принтер", "сканер", "монитор", "интернет", "доступ", "логин", "компьютер",
            "запрос", "вход", "файл", "сайт", "роутер", "телефон", "офис", "адрес", "кабинет",
            "сотрудник", "отдел", "аккаунт", "портал", "отчет", "документ", "договор",
            "клиент", "проект", "картридж", "драйвер", "браузер", "пакет", "сертификат",
            "проектор", "терминал", "экран", "сбор",
        ],
    ),
    (
        Paradigm::NounMascVelar,
        &["запуск", "ноутбук", "ящик", "звук", "диск", "поиск"],
    ),
    (
        Paradigm::NounMascSoft,
        &["пароль", "кабель", "пользователь", "профиль", "модуль", "руководитель", "календарь"],
    ),
    (Paradigm::NounMascJ, &["сбой", "случай"]),
    (
        Paradigm::NounFemA,
        &[
            "почта", "база", "программа", "система", "клавиатура", "работа", "проблема", "камера",
            "команда", "страница", "зарплата", "форма", "сумма", "минута",
        ],
    ),
    (
        Paradigm::NounFemAVelar,
        &[
            "ошибка", "папка", "задача", "флешка", "справка", "установка", "настройка", "заявка",
            "подписка", "ссылка", "мышка", "блокировка", "загрузка", "рассылка",
        ],
    ),
    (
        Paradigm::NounFemIya,
        &[
            "бухгалтерия", "лицензия", "версия", "конфигурация", "авторизация", "синхронизация",
            "сессия", "категория", "операция", "информация", "организация",
        ],
    ),
    (
        Paradigm::NounFemSoft,
        &["сеть", "печать", "помощь", "запись", "подпись", "память", "связь", "ведомость", "очередь"],
    ),
    (
        Paradigm::NounNeutIe,
        &[
            "подключение", "соединение", "приложение", "сообщение", "обновление", "отключение",
            "оборудование", "обращение", "уведомление", "разрешение", "значение",
        ],
    ),
    (Paradigm::NounNeutO, &["письмо", "окно", "место", "право"]),
    (
        Paradigm::AdjHard,
        &[
            "недоступный", "доступный", "срочный", "новый", "нужный", "учетный", "электронный",
            "важный", "полный", "локальный", "удаленный", "корпоративный", "неверный",
            "правильный", "старый", "постоянный", "почтовый", "программный",
        ],
    ),
    (
        Paradigm::AdjVelar,
        &["критический", "технический", "бухгалтерский"],
    ),
    (
        Paradigm::VerbAt,
        &[
            "работать", "печатать", "отвечать", "открывать", "запускать", "подключать",
            "получать", "понимать", "нажимать", "делать", "сделать", "читать", "прочитать",
            "помогать", "закрывать", "отображать", "включать", "выключать", "зависать",
            "пропадать", "отключать", "показывать", "сбрасывать", "восстанавливать",
            "открываться", "запускаться", "подключаться", "отключаться", "закрываться",
            "отображаться", "загружаться",
        ],
    ),
    (
        Paradigm::VerbYat,
        &[
            "отправлять", "исправлять", "обновлять", "проверять", "заменять", "терять",
            "появляться", "обновляться",
        ],
    ),
    (
        Paradigm::VerbIt,
        &[
            "установить", "сбросить", "исправить", "обновить", "заменить", "починить",
            "проверить", "настроить", "удалить", "говорить", "звонить", "сохранить", "просить",
            "тормозить", "сохраниться", "обновиться",
        ],
    ),
    (
        Paradigm::VerbItSibilant,
        &[
            "подключить", "включить", "отключить", "выключить", "получить", "подключиться",
            "включиться",
        ],
    ),
    (Paradigm::VerbEt, &["видеть", "смотреть", "висеть"]),
    (
        Paradigm::Invariable,
        &[
            "критично", "срочно", "полностью", "нет", "при", "для", "что", "как", "когда", "где",
            "уже", "еще", "очень", "также", "только", "можно", "нужно", "после", "через", "без",
            "под", "над", "или", "это", "постоянно", "снова", "опять", "вообще", "тоже",
        ],
    ),
];

/// Forms the paradigms do not cover: (lemma, forms)
const IRREGULAR: &[(&str, &[&str])] = &[
    ("весь", &["вся", "всё", "все", "всего", "всей", "всем", "всеми", "всех", "всю"]),
    ("быть", &["есть", "был", "была", "было", "были", "буду", "будешь", "будет", "будем", "будете", "будут"]),
    ("мочь", &["могу", "можешь", "может", "можем", "можете", "могут", "мог", "могла", "могло", "могли"]),
    ("войти", &["войду", "войдёт", "войдет", "войдём", "войдут", "вошёл", "вошел", "вошла", "вошли"]),
    ("зайти", &["зайду", "зайдёт", "зайдет", "зайдут", "зашёл", "зашел", "зашла", "зашли"]),
    ("забыть", &["забуду", "забудет", "забыл", "забыла", "забыли"]),
    ("выдавать", &["выдаю", "выдаёт", "выдает", "выдают", "выдавал", "выдавала", "выдавало", "выдавали"]),
    ("открыть", &["открою", "откроет", "откроют", "открыл", "открыла", "открыло", "открыли"]),
    ("открыться", &["откроется", "откроются", "открылся", "открылась", "открылось", "открылись"]),
    ("данные", &["данных", "данным", "данными"]),
    ("недоступный", &["недоступен"]),
    ("доступный", &["доступен"]),
    ("нужный", &["нужен"]),
    ("письмо", &["писем"]),
    ("ошибка", &["ошибок"]),
    ("папка", &["папок"]),
    ("заявка", &["заявок"]),
    ("ссылка", &["ссылок"]),
    ("право", &["прав"]),
    ("окно", &["окон"]),
];

/// Builder preloaded with the built-in lexicon
pub fn builtin() -> Result<LexiconBuilder> {
    let mut builder = LexiconBuilder::new();

    for (paradigm, lemmas) in VOCABULARY {
        for lemma in *lemmas {
            let forms = inflect(lemma, *paradigm)?;
            builder.add_lexeme(lemma, forms)?;
        }
    }

    for (lemma, forms) in IRREGULAR {
        builder.add_lexeme(lemma, forms.iter())?;
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflect_noun() {
        let forms = inflect("ошибка", Paradigm::NounFemAVelar).unwrap();
        assert!(forms.contains(&"ошибку".to_string()));
        assert!(forms.contains(&"ошибки".to_string()));
    }

    #[test]
    fn test_inflect_reflexive_verb() {
        let forms = inflect("открываться", Paradigm::VerbAt).unwrap();
        assert!(forms.contains(&"открывается".to_string()));
        assert!(forms.contains(&"открывалась".to_string()));
        assert!(forms.contains(&"открываться".to_string()));
        assert!(!forms.iter().any(|f| f.ends_with("ийся")));
    }

    #[test]
    fn test_inflect_participles() {
        let forms = inflect("работать", Paradigm::VerbAt).unwrap();
        assert!(forms.contains(&"работающий".to_string()));
        assert!(forms.contains(&"работал".to_string()));
    }

    #[test]
    fn test_inflect_wrong_suffix() {
        assert!(inflect("сервер", Paradigm::NounFemA).is_err());
    }

    #[test]
    fn test_vocabulary_lemmas_fit_paradigms() {
        for (paradigm, lemmas) in VOCABULARY {
            for lemma in *lemmas {
                assert!(
                    inflect(lemma, *paradigm).is_ok(),
                    "lemma {} is filed under {:?}",
                    lemma,
                    paradigm
                );
            }
        }
    }

    #[test]
    fn test_adjective_forms() {
        let analyzer = builtin().unwrap().build();
        assert_eq!(analyzer.normal_form("программного"), "программный");
        assert_eq!(analyzer.normal_form("технической"), "технический");
    }

    #[test]
    fn test_builtin_covers_vocabulary() {
        let analyzer = builtin().unwrap().build();
        for (_, lemmas) in VOCABULARY {
            for lemma in *lemmas {
                assert_eq!(analyzer.normal_form(lemma), *lemma, "lemma {} is not stable", lemma);
            }
        }
        for (lemma, _) in IRREGULAR {
            assert_eq!(analyzer.normal_form(lemma), *lemma);
        }
    }

    #[test]
    fn test_builtin_irregulars() {
        let analyzer = builtin().unwrap().build();
        assert_eq!(analyzer.normal_form("все"), "весь");
        assert_eq!(analyzer.normal_form("недоступен"), "недоступный");
        assert_eq!(analyzer.normal_form("выдает"), "выдавать");
        assert_eq!(analyzer.normal_form("данных"), "данные");
        assert_eq!(analyzer.normal_form("могу"), "мочь");
    }
}
