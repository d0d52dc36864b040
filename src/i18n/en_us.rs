// ============================================================================
// ResxTool - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ✅ Translation key-value pairs maintenance
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain business logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Init command
    ("init.start", "Initializing resxtool configuration..."),
    ("init.config_exists", "Config file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite it"),
    ("init.config_created", "Config file created: {}"),
    (
        "init.next_steps",
        "Edit the locale table and base strings, then run `resxtool scaffold`",
    ),
    ("init.create_failed", "Failed to create config file: {}"),
    // Scaffold command
    ("scaffold.start", "Generating resource files..."),
    ("scaffold.plan", "{} locales, {} base strings"),
    ("scaffold.skip_exists", "SKIP (exists): {}"),
    ("scaffold.would_create", "WOULD CREATE: {}"),
    ("scaffold.created", "CREATED: {}"),
    // Translate command
    ("translate.start", "Starting DeepL translation..."),
    ("translate.plan", "{} target locales, source language {}"),
    ("translate.keys_found", "{} string keys found in {}"),
    ("translate.generating", "Generating: {} (DeepL target={})"),
    ("translate.key_failed", "Translation failed for '{}': {}"),
    ("translate.locale_done", "{} keys translated -> {}"),
    // Summary
    ("summary.scaffold_title", "Scaffold Summary"),
    ("summary.translate_title", "Translation Summary"),
    ("summary.created", "Created: {}"),
    ("summary.would_create", "Would create: {}"),
    ("summary.skipped", "Skipped: {}"),
    ("summary.output_dir", "Output dir: {}"),
    ("summary.duration", "Duration: {}s"),
    ("summary.keys_found", "{} keys in {}"),
    ("summary.locale_line", "{} {} {}/{} translated {} {}"),
    ("summary.translated_detail", "  {} {}: {}"),
    ("summary.blank_detail", "  {} {}: blank, kept as-is"),
    ("summary.blank_kept", "  {} {} blank values kept as-is (not counted as translated)"),
    ("summary.failure_detail", "  {} {}: {} (kept \"{}\")"),
    (
        "summary.failed_total",
        "{} keys kept their source text after a failed translation",
    ),
    ("summary.done", "Done."),
];
