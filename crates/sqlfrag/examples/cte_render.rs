//! Prints rendered CTE fragments and WITH clauses.
//!
//! Run with:
//!   cargo run --example cte_render -p sqlfrag

use sqlfrag::{Cte, Fragment, SqlResult, With, expr, sql};

fn show(label: &str, fragment: &impl Fragment) -> SqlResult<()> {
    let rendered = fragment.render()?;
    println!("[{label}]");
    println!("  SQL:    {}", rendered.sql);
    println!("  params: {:?}", rendered.params);
    println!();
    Ok(())
}

fn main() -> SqlResult<()> {
    show("simple CTE", &Cte::new("cte1", sql("SELECT 1")))?;

    let tree = Cte::new(
        "tree",
        expr(
            "SELECT id, parent_id FROM nodes WHERE id = ? \
             UNION ALL SELECT n.id, n.parent_id FROM nodes n JOIN tree t ON n.parent_id = t.id",
        )
        .bind(1_i64),
    )
    .columns(["id", "parent_id"])
    .recursive(true);
    show("recursive CTE", &tree)?;

    let q = With::new()
        .cte(tree)
        .cte(Cte::new(
            "leaves",
            expr("SELECT id FROM nodes WHERE kind = ?").bind("leaf"),
        ))
        .select(sql("SELECT t.id FROM tree t JOIN leaves l ON l.id = t.id LIMIT ").bind(10_i64));
    show("WITH clause", &q)?;

    match Cte::named("pending").render() {
        Ok(_) => println!("[missing body] unexpectedly rendered"),
        Err(e) => println!("[missing body] {e}"),
    }

    Ok(())
}
