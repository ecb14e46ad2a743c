// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    ("validation.failed", "One or more fields are invalid."),
    ("validation.invalid_input", "Invalid input"),
    ("validation.inactive_service_type", "This service type is not available for new bookings."),
    ("auth.email_exists", "This email is already registered."),
    ("auth.invalid_credentials", "Invalid email or password."),
    ("auth.invalid_token", "Missing or invalid authentication token."),
    ("auth.forbidden", "Access denied."),
    ("not_found.organization", "Organization not found."),
    ("not_found.user", "User not found."),
    ("not_found.document", "Document not found."),
    ("not_found.service_type", "Service type not found."),
    ("not_found.appointment", "Appointment not found."),
    ("not_found.message", "Message not found."),
    ("request.invalid_path", "Invalid path parameter."),
    ("internal.unexpected", "An unexpected error occurred."),
];

const PT: &[(&str, &str)] = &[
    ("validation.failed", "Um ou mais campos são inválidos."),
    ("validation.invalid_input", "Entrada inválida"),
    ("validation.inactive_service_type", "Este tipo de serviço não está disponível para novos agendamentos."),
    ("auth.email_exists", "Este e-mail já está em uso."),
    ("auth.invalid_credentials", "E-mail ou senha inválidos."),
    ("auth.invalid_token", "Token de autenticação inválido ou ausente."),
    ("auth.forbidden", "Acesso negado."),
    ("not_found.organization", "Organização não encontrada."),
    ("not_found.user", "Usuário não encontrado."),
    ("not_found.document", "Documento não encontrado."),
    ("not_found.service_type", "Tipo de serviço não encontrado."),
    ("not_found.appointment", "Agendamento não encontrado."),
    ("not_found.message", "Mensagem não encontrada."),
    ("request.invalid_path", "Parâmetro de caminho inválido."),
    ("internal.unexpected", "Ocorreu um erro inesperado."),
];

/// Message catalogs keyed by language, then by message key.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", EN.iter().copied().collect());
        catalogs.insert("pt", PT.iter().copied().collect());
        Self { catalogs }
    }

    /// Looks up `key` for `lang`, falling back to English and then to the key.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| {
                self.catalogs
                    .get(DEFAULT_LANG)
                    .and_then(|catalog| catalog.get(key))
            })
            .map(|message| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "auth.forbidden"), "Access denied.");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "no.such.key"), "no.such.key");
    }

    #[test]
    fn catalogs_cover_the_same_keys() {
        let en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        let pt: Vec<_> = PT.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, pt);
    }
}
