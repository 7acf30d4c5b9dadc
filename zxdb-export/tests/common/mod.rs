use rusqlite::{params, Connection};
use std::path::Path;

/// Creates a small database with the ZXDB tables the generator reads.
///
/// Entries: 1 "Abex" (two downloads), 2 "zen", 3 "3D Tanx", 4 "Knight Lore"
/// (score only for 1 and 4).
pub fn create_fixture_db(path: &Path, with_scores: bool) {
    let conn = Connection::open(path).expect("Create fixture database");
    conn.execute_batch(
        "
        create table genretypes (id integer primary key, text text not null);
        create table machinetypes (id integer primary key, text text not null);
        create table filetypes (id integer primary key, text text not null);
        create table entries (
            id integer primary key,
            title text not null,
            genretype_id integer not null,
            machinetype_id integer not null
        );
        create table downloads (
            id integer primary key,
            entry_id integer not null,
            file_link text not null,
            file_size integer,
            filetype_id integer not null
        );
        insert into genretypes values (1, 'Arcade: Action'), (2, 'Strategy: War');
        insert into machinetypes values (1, 'ZX-Spectrum 48K');
        insert into filetypes values (8, 'Tape image'), (9, 'Instructions');
        ",
    )
    .expect("Create fixture schema");

    let entries = [
        (1, "Abex", 1),
        (2, "zen", 2),
        (3, "3D Tanx", 1),
        (4, "Knight Lore", 1),
    ];
    for (id, title, genre) in entries {
        conn.execute(
            "insert into entries values (?1, ?2, ?3, 1)",
            params![id, title, genre],
        )
        .unwrap();
    }

    let downloads: [(i64, &str, Option<i64>, i64); 5] = [
        (1, "/pub/sinclair/games/a/Abex.tzx.zip", Some(10_240), 8),
        (1, "/pub/sinclair/games-info/a/Abex.txt", None, 9),
        (2, "/pub/sinclair/games/z/Zen.tap.zip", Some(4_096), 8),
        (3, "/pub/sinclair/games/0/3DTanx.tzx.zip", Some(8_000), 8),
        (4, "/pub/sinclair/games/k/KnightLore.tzx.zip", Some(30_000), 8),
    ];
    for (entry_id, link, size, filetype) in downloads {
        conn.execute(
            "insert into downloads (entry_id, file_link, file_size, filetype_id) values (?1, ?2, ?3, ?4)",
            params![entry_id, link, size, filetype],
        )
        .unwrap();
    }

    if with_scores {
        conn.execute_batch(
            "
            create table scores (entry_id integer not null, score real not null);
            insert into scores values (1, 6.5), (4, 9.0), (4, 7.0);
            ",
        )
        .unwrap();
    }
}
