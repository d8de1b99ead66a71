// Tables of the record database. Only the columns read here are declared.

diesel::table! {
    file_link (id) {
        id -> Int4,
        path -> Text,
        module -> Nullable<Text>,
    }
}

diesel::table! {
    tree_report (id) {
        id -> Int4,
        rootlocation -> Nullable<Text>,
    }
}

diesel::table! {
    settings (id) {
        id -> Int4,
        name -> Text,
        value -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(file_link, settings, tree_report);
