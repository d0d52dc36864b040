// ============================================================================
// ResxTool - Table de traduction française
// ============================================================================
//
// 文件: src/i18n/fr_fr.rs
// 职责: French translation content definition
// 边界:
//   - ✅ French translation strings definition
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// Table de traduction française
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Commande init
    ("init.start", "Initialisation de la configuration resxtool..."),
    ("init.config_exists", "Le fichier de configuration existe déjà : {}"),
    ("init.use_force_hint", "Utilise --force pour l'écraser"),
    ("init.config_created", "Fichier de configuration créé : {}"),
    (
        "init.next_steps",
        "Modifie la table des langues et les textes de base, puis lance `resxtool scaffold`",
    ),
    ("init.create_failed", "Impossible de créer la configuration : {}"),
    // Commande scaffold
    ("scaffold.start", "Génération des fichiers de ressources..."),
    ("scaffold.plan", "{} langues, {} textes de base"),
    ("scaffold.skip_exists", "SKIP (existe) : {}"),
    ("scaffold.would_create", "SERAIT CRÉÉ : {}"),
    ("scaffold.created", "CRÉÉ : {}"),
    // Commande translate
    ("translate.start", "Démarrage de la traduction DeepL..."),
    ("translate.plan", "{} langues cibles, langue source {}"),
    ("translate.keys_found", "{} clés string trouvées dans {}"),
    ("translate.generating", "Génération : {} (DeepL target={})"),
    ("translate.key_failed", "Traduction échouée pour '{}' : {}"),
    ("translate.locale_done", "{} clés traduites -> {}"),
    // Résumé
    ("summary.scaffold_title", "Résumé de la génération"),
    ("summary.translate_title", "Résumé de la traduction"),
    ("summary.created", "Créés : {}"),
    ("summary.would_create", "Seraient créés : {}"),
    ("summary.skipped", "Ignorés : {}"),
    ("summary.output_dir", "Dossier de sortie : {}"),
    ("summary.duration", "Durée : {}s"),
    ("summary.keys_found", "{} clés dans {}"),
    ("summary.locale_line", "{} {} {}/{} traduites {} {}"),
    ("summary.translated_detail", "  {} {} : {}"),
    ("summary.blank_detail", "  {} {} : vide, conservé tel quel"),
    ("summary.blank_kept", "  {} {} valeurs vides conservées telles quelles (non comptées comme traduites)"),
    ("summary.failure_detail", "  {} {} : {} (conservé « {} »)"),
    (
        "summary.failed_total",
        "{} clés ont gardé leur texte source après un échec de traduction",
    ),
    ("summary.done", "Terminé."),
];
