// Example: an adapter re-binding its source when grouping is toggled.
use std::rc::Rc;

use itemsource::{CommandLog, ItemsCollection, ObservableVec, SourceFactory};
use itemsource_adapter::{ItemsAdapter, ItemsViewConfig};

fn dump(adapter: &ItemsAdapter<Vec<&'static str>, &'static str>) {
    for position in 0..adapter.item_count() {
        println!(
            "  {position:>2} {:?} {:?}",
            adapter.item_view_type(position),
            adapter.item(position)
        );
    }
}

fn main() {
    let log = Rc::new(CommandLog::new());
    let mut adapter: ItemsAdapter<Vec<&str>, &str> = ItemsAdapter::new(
        SourceFactory::new(log.clone()),
        ItemsViewConfig::new()
            .with_header(true)
            .with_group_header_template(true),
    );

    let groups = Rc::new(ObservableVec::from_vec(vec![
        vec!["ant", "bee"],
        vec!["cat"],
        vec![],
    ]));
    adapter.set_items_source(Some(ItemsCollection::observable(groups.clone())));
    println!("flat:");
    dump(&adapter);

    adapter.set_config(adapter.config().with_grouped(true));
    println!("grouped:");
    dump(&adapter);

    groups.remove(0).unwrap();
    println!("commands: {:?}", log.take());
    dump(&adapter);
}
