use super::product::Product;

/// Menu the service starts with: ids 0 through 9.
pub fn products() -> Vec<Product> {
    SEED.iter()
        .zip(0..)
        .map(|(&(image_url, title, description, cost, article), id)| Product {
            id,
            image_url: image_url.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            cost: cost.to_owned(),
            article: article.to_owned(),
        })
        .collect()
}

// (image, title, description, cost, article)
const SEED: &[(&str, &str, &str, &str, &str)] = &[
    (
        "https://media.leverans.ru/product_images_inactive/moscow/shou-restoran-lalalend/капучино.jpg",
        "Капучино",
        "Кофейный напиток итальянской кухни на основе эспрессо с добавлением в него подогретого до 65 градусов вспененного молока.",
        "120",
        "31343356",
    ),
    (
        "https://i.pinimg.com/originals/46/fc/c2/46fcc2767aed83789f346dd310f29da3.jpg",
        "Эспрессо",
        "Это популярный способ приготовления кофе, который отличается небольшим размером порции и характерными слоями: тёмной массой, покрытой более светлой пенкой, называемой сливками.",
        "150",
        "25142265",
    ),
    (
        "https://avatars.mds.yandex.net/i?id=11af79cd4db45ddba235a09c46a16926_l-5858967-images-thumbs&n=13",
        "Латте",
        "Кофейный напиток на основе молока, представляющий собой трёхслойную смесь из молочной пены",
        "130",
        "86551930",
    ),
    (
        "https://scanformenu.ru/compiled/uploads/item_images/2f2d768c95a1a943a0d4d8b1b4b31992.jpg",
        "Раф",
        "Это кофейный напиток, который готовится из эспрессо, сливок и сахара. Его можно назвать кофейно-молочным коктейлем или десертом, так как он очень вкусный, сладкий и нежный, в чём-то напоминает крем-брюле.",
        "160",
        "42472068",
    ),
    (
        "https://lafoy.ru/photo_l/foto-2426-2.jpg",
        "Американо",
        "Американо готовится из одной или двух порций эспрессо, в который добавляется от 30 до 470 мл горячей воды. В процессе приготовления горячую воду можно брать как из специальной эспрессомашины, так и из отдельного чайника или подогревателя. Для обогащения вкуса в американо могут добавляться сливки или молоко, разнообразные сиропы, корица, шоколад.",
        "100",
        "64816553",
    ),
    (
        "https://avatars.mds.yandex.net/get-entity_search/4759071/952720682/S600xU_2x",
        "Доппио",
        "Кофейный напиток, который готовится как двойная порция эспрессо с помощью кофейного фильтра или эспрессо-машины.",
        "80",
        "43223687",
    ),
    (
        "https://avatars.mds.yandex.net/get-entity_search/1528499/952453330/S600xU_2x",
        "Аффогато",
        "Итальянский кофейный десерт. Его готовят так: шарик джелато (молочного мороженого) заливают чашечкой горячего эспрессо (30 мл). Бариста часто экспериментируют с ингредиентами и добавляют коньяк, ликёр или сироп. В качестве топпинга используют горький шоколад, какао-порошок, орехи, ягоды, мёд.",
        "200",
        "41337060",
    ),
    (
        "https://cafecentral.wien/wp-content/uploads/einspaenner_cafecentral.jpg",
        "Венский кофе",
        "Это сочетание крепкого чёрного кофе и пенки из взбитых сливок. Последняя аккуратно размещается на поверхности кофе без размешивания.",
        "230",
        "84544447",
    ),
    (
        "https://i.pinimg.com/736x/03/d9/d2/03d9d27010057294eded352af161340f.jpg",
        "Моккачино",
        "Это кофейный напиток, который напоминает капучино или латте, но с добавлением шоколадного соуса.",
        "190",
        "89370190",
    ),
    (
        "https://lafoy.ru/photo_l/foto-2426-19.jpg",
        "Бомбон",
        "Он состоит из эспрессо и сгущённого молока. Этот напиток прекрасно подойдёт на завтрак и зарядит бодростью и хорошим настроением на целый день.",
        "175",
        "59247291",
    ),
];
