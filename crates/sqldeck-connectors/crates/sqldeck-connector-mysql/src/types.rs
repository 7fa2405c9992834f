//! MySQL type-code normalization

/// Map a MySQL wire-protocol type code to a readable type name.
///
/// The table follows the protocol's numeric column types. Codes outside
/// the table come back as their decimal text so nothing is silently
/// swallowed.
pub fn type_name(code: u8) -> String {
    let name = match code {
        0 => "decimal",
        1 => "tinyint",
        2 => "smallint",
        3 => "int",
        4 => "float",
        5 => "double",
        6 => "null",
        7 => "timestamp",
        8 => "bigint",
        9 => "mediumint",
        10 => "date",
        11 => "time",
        12 => "datetime",
        13 => "year",
        // NEWDATE is treated as date
        14 => "date",
        15 => "varchar",
        16 => "bit",
        245 => "json",
        246 => "decimal",
        247 => "enum",
        248 => "set",
        249 => "tinyblob",
        250 => "mediumblob",
        251 => "longblob",
        252 => "blob",
        253 => "var_string",
        254 => "string",
        255 => "geometry",
        other => return other.to_string(),
    };
    name.to_string()
}
