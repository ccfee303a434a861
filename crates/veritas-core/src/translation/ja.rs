//! Japanese messages
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{Catalog, Language};
use crate::code;

/// Registers the Japanese message for every built-in code
pub fn default_japanese(catalog: &mut Catalog) {
    let ja = Language::JAPANESE;
    let messages = [
        // type errors
        (code::NOT_STRING, "は文字列である必要があります"),
        (code::NOT_STRUCT, "は構造体である必要があります"),
        (code::NOT_STRUCT_FIELD, "は構造体のフィールドである必要があります"),
        (code::NOT_ARRAY, "は配列である必要があります"),
        (code::NOT_MAP, "はマップである必要があります"),
        (code::NOT_NUMERIC, "は数値である必要があります"),
        (code::NOT_ITERABLE, "は反復可能な値である必要があります"),
        (code::NOT_ASSIGNABLE, "は {0} に代入できません"),
        // lookups
        (code::NO_KEY, "にはキー ({0}) の値が必要です"),
        (code::OUT_OF_RANGE, "には{0}個より多くの要素が必要です"),
        // conversion
        (code::CONVERSION_FAILED, "{0}"),
        // others
        (code::CUSTOM, "{0}"),
        (code::INVALID, "は不正な値です"),
        (code::INVALID_TAG, "のタグ ({0}: {1}) が不正です"),
        (code::REQUIRED, "は必須です"),
        (code::NON_ZERO, "を空白にすることはできません"),
        (code::NIL_OR_NON_ZERO, "を指定する場合は空白にすることはできません"),
        (code::ZERO_ONLY, "は指定できません"),
        (code::TOO_LONG_LENGTH, "は{0}文字までです"),
        (code::TOO_SHORT_LENGTH, "は{0}文字以上必要です"),
        (code::TOO_LONG_LEN, "は{0}要素までです"),
        (code::TOO_SHORT_LEN, "は{0}要素以上必要です"),
        (code::GREATER_THAN, "は{0}より大きい値にする必要があります"),
        (code::LESS_THAN, "は{0}より小さい値にする必要があります"),
        (code::GREATER_THAN_OR_EQUAL, "は{0}以上の値にする必要があります"),
        (code::LESS_THAN_OR_EQUAL, "は{0}以下の値にする必要があります"),
        (code::INCLUSION, "は {0} のいずれかである必要があります"),
        (code::REGEXP_MISMATCH, "は正規表現 ({0}) に一致しません"),
        (code::INVALID_URL_FORMAT, "は不正なURLです"),
        (code::INVALID_SCHEME, "のスキームは {0} のいずれかである必要があります"),
    ];

    for (code, template) in messages {
        catalog.set(ja.clone(), code, template);
    }
}
