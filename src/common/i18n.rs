// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

use anyhow::Context;

pub const DEFAULT_LANG: &str = "en";

// Os arquivos de mensagens vão embutidos no binário.
const BUNDLES: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

/// Mensagens de erro por idioma, indexadas pelo `reason` do erro.
#[derive(Clone, Debug)]
pub struct I18nStore {
    messages: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut messages = HashMap::new();
        for (lang, raw) in BUNDLES {
            let bundle: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("Arquivo de mensagens '{lang}' inválido"))?;
            messages.insert(lang.to_string(), bundle);
        }
        Ok(Self {
            messages: Arc::new(messages),
        })
    }

    // Idioma desconhecido cai no padrão; chave desconhecida volta a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|bundle| bundle.get(key))
            .or_else(|| {
                self.messages
                    .get(DEFAULT_LANG)
                    .and_then(|bundle| bundle.get(key))
            })
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundles_share_the_same_keys() {
        let store = I18nStore::load().unwrap();
        let en: Vec<_> = {
            let mut keys: Vec<_> = store.messages["en"].keys().collect();
            keys.sort();
            keys
        };
        let mut pt: Vec<_> = store.messages["pt"].keys().collect();
        pt.sort();
        assert_eq!(en, pt);
    }

    #[test]
    fn translate_falls_back_to_default_language() {
        let store = I18nStore::load().unwrap();
        assert_eq!(store.translate("pt", "point_not_found"), "Ponto de coleta não encontrado.");
        assert_eq!(store.translate("de", "point_not_found"), "Point not found.");
        assert_eq!(store.translate("en", "no_such_key"), "no_such_key");
    }
}
