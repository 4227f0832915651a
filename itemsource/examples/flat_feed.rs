// Example: forwarding edits on an observable list to a surface.
use std::rc::Rc;

use itemsource::{
    CommandLog, ItemsCollection, ItemsViewSource, ObservableVec, SourceFactory, SourceOptions,
};

fn main() {
    let log = Rc::new(CommandLog::new());
    let factory: SourceFactory<&str, &str> = SourceFactory::new(log.clone());

    let list: Rc<ObservableVec<&str>> =
        Rc::new(["apple", "banana", "cherry"].into_iter().collect());
    let options = SourceOptions::new().with_header(true).with_footer(true);
    let mut source = factory.create_list(ItemsCollection::observable(list.clone()), &options);
    println!("count={}", source.count());

    list.push("damson");
    list.remove(0).unwrap();
    list.move_item(2, 0).unwrap();
    list.replace_range(0, 2, ["elder", "fig", "grape"]).unwrap();
    for command in log.take() {
        println!("{command:?}");
    }

    for position in 0..source.count() {
        println!("{position}: {:?}", source.item_at(position));
    }

    source.dispose();
    println!("subscribers after dispose={}", list.subscriber_count());
}
